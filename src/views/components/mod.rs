pub mod capture;
pub mod compass;
pub mod death;
pub mod kill_feed;
pub mod notification;
pub mod progress;
pub mod revive;
pub mod roster;
