pub mod notification;
pub mod resignation;
