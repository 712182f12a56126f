pub mod credential;

pub use credential::ProviderCredential;
