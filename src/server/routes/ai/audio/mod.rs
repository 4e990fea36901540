mod transcriptions;

pub use transcriptions::configure_routes;
