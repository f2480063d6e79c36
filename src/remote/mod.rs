//! Remote write wire format, series encoding and the HTTP transport.
mod client;
mod encoder;
pub mod prompb;


pub use client::{RemoteWriteClient, WriteTransport, compress_write_request};
pub use encoder::{NAME_LABEL, SeriesEncoder, histogram_point, labels};
