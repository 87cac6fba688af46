pub mod db;
pub mod provider_llm;

pub use db::DbAdapter;
pub use provider_llm::ChatProviderAdapter;
