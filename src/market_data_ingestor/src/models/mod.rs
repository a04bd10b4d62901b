pub mod candle;
pub mod news;
pub mod request_params;
