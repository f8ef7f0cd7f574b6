use async_trait::async_trait;

/// Outbound message channel.
///
/// Delivery is best-effort: implementations swallow transport failures and
/// report them through logging only, so callers never branch on the result.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str);
}
