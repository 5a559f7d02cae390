mod news;
mod user;

pub use news::{FeedbackStatus, NewsService, TopicNews};
pub use user::UserService;
