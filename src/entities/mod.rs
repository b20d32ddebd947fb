pub mod announcements;
pub mod lottery_history;
pub mod url_categories;
pub mod users;
pub mod wheel_configs;

pub use announcements as announcement_entity;
pub use lottery_history as lottery_history_entity;
pub use url_categories as url_category_entity;
pub use users as user_entity;
pub use wheel_configs as wheel_config_entity;
