use super::domain::Credential;
use super::status::CredentialStatus;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusTally {
    pub total: usize,
    pub lifetime: usize,
    pub active: usize,
    pub renewal_open: usize,
    pub expired: usize,
    pub unknown: usize,
}

impl StatusTally {
    pub fn from_credentials(credentials: &[Credential]) -> Self {
        credentials
            .iter()
            .fold(Self::default(), |mut tally, credential| {
                tally.record(credential.status);
                tally
            })
    }

    pub fn record(&mut self, status: CredentialStatus) {
        self.total += 1;
        match status {
            CredentialStatus::Lifetime => self.lifetime += 1,
            CredentialStatus::Active => self.active += 1,
            CredentialStatus::RenewalOpen => self.renewal_open += 1,
            CredentialStatus::Expired => self.expired += 1,
            CredentialStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn count(&self, status: CredentialStatus) -> usize {
        match status {
            CredentialStatus::Lifetime => self.lifetime,
            CredentialStatus::Active => self.active,
            CredentialStatus::RenewalOpen => self.renewal_open,
            CredentialStatus::Expired => self.expired,
            CredentialStatus::Unknown => self.unknown,
        }
    }

    /// Credentials that need attention now.
    pub fn needs_action(&self) -> usize {
        self.renewal_open + self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_status_once() {
        let mut tally = StatusTally::default();
        for status in CredentialStatus::ordered() {
            tally.record(status);
        }
        tally.record(CredentialStatus::Expired);

        assert_eq!(tally.total, 6);
        assert_eq!(tally.count(CredentialStatus::Expired), 2);
        assert_eq!(tally.count(CredentialStatus::Lifetime), 1);
        assert_eq!(tally.needs_action(), 3);
    }
}
