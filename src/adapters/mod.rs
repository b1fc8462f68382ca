// Adapters layer: concrete implementations of the domain ports.

pub mod cloudflare;

pub use cloudflare::CloudflareClient;
