pub mod channel_source;

pub use channel_source::ChannelLocationSource;
