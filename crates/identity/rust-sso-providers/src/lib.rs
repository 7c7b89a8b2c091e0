//! Concrete SSO provider adapters.
//!
//! Every adapter implements [`SsoProviderAdapter`](rust_sso_core::SsoProviderAdapter):
//! it supplies the provider's discovery endpoints, its feature flags and the
//! mapping from the provider's user info (or ID token claims) to the common
//! [`OpenID`](rust_sso_core::OpenID) record. Ad-hoc providers without a
//! dedicated adapter are assembled with [`GenericProviderBuilder`].

mod apple;
mod bitbucket;
mod discord;
mod facebook;
mod fitbit;
mod generic;
mod github;
mod gitlab;
mod google;
mod kakao;
mod line;
mod linkedin;
mod microsoft;
mod naver;
mod notion;
mod seznam;
mod soundcloud;
mod spotify;
mod tidal;
mod twitter;
mod util;
mod yandex;


pub use apple::AppleSso;
pub use bitbucket::BitbucketSso;
pub use discord::DiscordSso;
pub use facebook::FacebookSso;
pub use fitbit::FitbitSso;
pub use generic::{GenericProvider, GenericProviderBuilder};
pub use github::GithubSso;
pub use gitlab::GitlabSso;
pub use google::GoogleSso;
pub use kakao::KakaoSso;
pub use line::LineSso;
pub use linkedin::LinkedInSso;
pub use microsoft::MicrosoftSso;
pub use naver::NaverSso;
pub use notion::NotionSso;
pub use seznam::SeznamSso;
pub use soundcloud::SoundcloudSso;
pub use spotify::SpotifySso;
pub use tidal::TidalSso;
pub use twitter::TwitterSso;
pub use yandex::YandexSso;

// Re-export common types for convenience
pub use rust_sso_core::{DiscoveryDocument, OpenID, SsoProviderAdapter};
