/// Network adapters for external API calls
mod osv_client;

pub use osv_client::OsvClient;
