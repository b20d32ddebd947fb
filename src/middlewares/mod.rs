pub mod cors;
pub mod nickname;

pub use cors::create_cors;
pub use nickname::{CurrentUser, NICKNAME_HEADER, NicknameMiddleware, get_user_from_request};
