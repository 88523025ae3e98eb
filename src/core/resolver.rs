//! Resolver trait and closure adapter

use super::arguments::Arguments;
use super::context::RequestContext;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Computes the value of one schema field
///
/// Every resolver receives its three inputs explicitly:
/// - `parent`: the value of the enclosing object (`None` for root fields)
/// - `args`: the arguments supplied to this field
/// - `ctx`: the request-scoped context holding the data store
///
/// Errors are caught at the field boundary and reported at the field's path.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(
        &self,
        parent: Option<&Value>,
        args: &Arguments,
        ctx: &RequestContext,
    ) -> Result<Value>;
}

/// Resolver backed by an async closure taking owned inputs
pub struct FnResolver<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> Resolver for FnResolver<F>
where
    F: Fn(Option<Value>, Arguments, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    async fn resolve(
        &self,
        parent: Option<&Value>,
        args: &Arguments,
        ctx: &RequestContext,
    ) -> Result<Value> {
        (self.f)(parent.cloned(), args.clone(), ctx.clone()).await
    }
}

/// Wrap an async closure as a shareable resolver
///
/// ```rust,ignore
/// let drafts = resolver_fn(|_parent, _args, ctx| async move {
///     let posts = ctx.db().list_records(&RecordFilter::drafts()).await?;
///     Ok(serde_json::to_value(posts)?)
/// });
/// ```
pub fn resolver_fn<F, Fut>(f: F) -> Arc<dyn Resolver>
where
    F: Fn(Option<Value>, Arguments, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(FnResolver { f })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::ContextFactory;
    use crate::storage::InMemoryDb;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_resolver_receives_all_inputs() {
        let resolver = resolver_fn(|parent, args, ctx| async move {
            anyhow::Ok(json!({
                "parent": parent,
                "title": args.get_str("title"),
                "operation": ctx.operation_id(),
            }))
        });

        let ctx = ContextFactory::new(Arc::new(InMemoryDb::new())).create();
        let parent = json!({"id": 1});
        let args = Arguments::new().with("title", "A");

        let value = resolver
            .resolve(Some(&parent), &args, &ctx)
            .await
            .expect("resolver should succeed");

        assert_eq!(value["parent"]["id"], 1);
        assert_eq!(value["title"], "A");
        assert_eq!(value["operation"], ctx.operation_id());
    }
}
