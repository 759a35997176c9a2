//! DTOs for decoding identity provider responses.
//!
//! The adapter decodes into this transport DTO first, then maps into the
//! domain profile record (`IdentityProfile`) in one pass. Unknown provider
//! fields are ignored; a missing required field fails the decode.

use serde::Deserialize;

use crate::domain::ports::IdentityProfile;

#[derive(Debug, Deserialize)]
pub(super) struct ProviderProfileDto {
    pub(super) id: String,
    pub(super) username: String,
    pub(super) name: String,
    /// Some providers omit the bio entirely for blank profiles.
    #[serde(default)]
    pub(super) description: String,
    pub(super) avatar_url: String,
}

impl From<ProviderProfileDto> for IdentityProfile {
    fn from(dto: ProviderProfileDto) -> Self {
        Self {
            external_id: dto.id,
            handle: dto.username,
            display_name: dto.name,
            bio: dto.description,
            avatar_url: dto.avatar_url,
        }
    }
}
