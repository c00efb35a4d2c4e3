
pub mod core {
    pub mod config;
    pub mod error;
    pub mod event;
    pub mod message;
    pub mod runner;
    pub mod sink;
    pub mod test;
}


pub mod reporters;
