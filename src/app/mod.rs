pub mod dispatch;
mod status;
mod studio;
