/// Supplies the bearer credential for outgoing requests.
///
/// Read on every request, so a provider backed by session state reflects
/// login and logout immediately.
pub trait CredentialProvider: Send + Sync {
    fn credential(&self) -> Option<String>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn credential(&self) -> Option<String> {
        self()
    }
}
