pub mod api_utils;
pub mod bulk;
pub mod icons;
pub mod job_events;
pub mod list_utils;
pub mod notifications;
