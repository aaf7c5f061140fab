mod alert;
mod license;
mod requirement;
mod worker;
