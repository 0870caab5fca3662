pub mod dummy;
pub mod google;

pub use dummy::DummySpeech;
pub use google::GoogleTranslateTts;
