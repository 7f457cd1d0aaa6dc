pub mod moonpay;

pub use moonpay::MoonPayProvider;
