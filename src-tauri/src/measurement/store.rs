use tracing::info;

use super::model::MeasurementProfile;
use crate::error::MeasurementError;

/// In-memory, ordered list of confirmed measurement profiles.
///
/// Profiles are addressed by position. Removing a profile shifts every
/// later profile down by one, so indices must not be held across a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    profiles: Vec<MeasurementProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MeasurementProfile> {
        self.profiles.get(index)
    }

    pub fn profiles(&self) -> &[MeasurementProfile] {
        &self.profiles
    }

    /// Add a profile at the end. Returns its index.
    pub fn append(&mut self, profile: MeasurementProfile) -> usize {
        info!("Appending measurement profile '{}'", profile.name);
        self.profiles.push(profile);
        self.profiles.len() - 1
    }

    pub fn replace_at(
        &mut self,
        index: usize,
        profile: MeasurementProfile,
    ) -> Result<(), MeasurementError> {
        let len = self.profiles.len();
        let slot = self
            .profiles
            .get_mut(index)
            .ok_or(MeasurementError::Index { index, len })?;
        info!(
            "Replacing measurement profile {} ('{}' -> '{}')",
            index, slot.name, profile.name
        );
        *slot = profile;
        Ok(())
    }

    /// Remove the profile at `index`, returning it.
    pub fn remove_at(&mut self, index: usize) -> Result<MeasurementProfile, MeasurementError> {
        let len = self.profiles.len();
        if index >= len {
            return Err(MeasurementError::Index { index, len });
        }
        let removed = self.profiles.remove(index);
        info!("Removed measurement profile {} ('{}')", index, removed.name);
        Ok(removed)
    }
}
