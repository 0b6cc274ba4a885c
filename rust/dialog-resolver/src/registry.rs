use std::{collections::HashMap, future::Future, sync::Arc};

use async_trait::async_trait;
use dialog_common::{CancellationToken, ConditionalSend, ConditionalSync, cancellable};
use dialog_format::Format;
use parking_lot::RwLock;
use tracing::debug;

use crate::ResolverError;

/// A [FormatLoader] supplies formats the registry was not given up front.
///
/// Any `Fn(u64) -> impl Future<Output = Result<Arc<dyn Format>, ResolverError>>`
/// closure is a loader.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait FormatLoader: ConditionalSync {
    /// Produce the format for the multicodec `code`
    async fn load(&self, code: u64) -> Result<Arc<dyn Format>, ResolverError>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Function, Loading> FormatLoader for Function
where
    Function: Fn(u64) -> Loading + ConditionalSync,
    Loading: Future<Output = Result<Arc<dyn Format>, ResolverError>> + ConditionalSend,
{
    async fn load(&self, code: u64) -> Result<Arc<dyn Format>, ResolverError> {
        (self)(code).await
    }
}

/// Maps multicodec codes to [Format]s.
///
/// Each code may be registered once. A code that is missing is handed to the
/// [FormatLoader], if there is one, and whatever it produces is kept for
/// every later lookup. When two lookups race to load the same code, the
/// first format to land in the registry is the one both of them get.
pub struct FormatRegistry {
    formats: RwLock<HashMap<u64, Arc<dyn Format>>>,
    loader: Option<Arc<dyn FormatLoader>>,
}

impl FormatRegistry {
    /// Build a registry from an initial set of formats and an optional
    /// loader. Two initial formats sharing a code is an error.
    pub fn new<Formats>(
        formats: Formats,
        loader: Option<Arc<dyn FormatLoader>>,
    ) -> Result<Self, ResolverError>
    where
        Formats: IntoIterator<Item = Arc<dyn Format>>,
    {
        let registry = Self {
            formats: RwLock::new(HashMap::new()),
            loader,
        };
        for format in formats {
            registry.add(format)?;
        }
        Ok(registry)
    }

    /// Register `format` under its code
    pub fn add(&self, format: Arc<dyn Format>) -> Result<(), ResolverError> {
        let code = format.code();
        let mut formats = self.formats.write();
        if formats.contains_key(&code) {
            return Err(ResolverError::already_registered(code));
        }
        debug!(code, name = %format.name(), "Registering format");
        formats.insert(code, format);
        Ok(())
    }

    /// Forget the format registered under `code`, if any
    pub fn remove(&self, code: u64) {
        if self.formats.write().remove(&code).is_some() {
            debug!(code, "Removed format");
        }
    }

    /// True when a format is registered under `code`
    pub fn contains(&self, code: u64) -> bool {
        self.formats.read().contains_key(&code)
    }

    /// The codes of every registered format, in ascending order
    pub fn codes(&self) -> Vec<u64> {
        let mut codes: Vec<u64> = self.formats.read().keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// The format registered under `code`, loading it if necessary
    pub async fn get(
        &self,
        code: u64,
        cancel: Option<&CancellationToken>,
    ) -> Result<Arc<dyn Format>, ResolverError> {
        let registered = self.formats.read().get(&code).cloned();
        if let Some(format) = registered {
            return Ok(format);
        }

        let Some(loader) = &self.loader else {
            return Err(ResolverError::unknown_format(code));
        };

        debug!(code, "Loading format");
        let loaded = cancellable(cancel, loader.load(code)).await??;

        if loaded.code() != code {
            return Err(ResolverError::InvalidArgument(format!(
                "Loader produced a format for 0x{:x} when 0x{code:x} was requested",
                loaded.code()
            )));
        }

        let mut formats = self.formats.write();
        Ok(formats.entry(code).or_insert(loaded).clone())
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("codes", &self.codes())
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use anyhow::Result;
    use async_trait::async_trait;
    use dialog_common::CancellationToken;
    use dialog_format::{
        DAG_CBOR, DAG_JSON, DagCborFormat, DagJsonFormat, Format, JSON, JsonFormat,
    };
    use tokio::sync::Notify;

    use super::{FormatLoader, FormatRegistry};
    use crate::ResolverError;

    #[derive(Default)]
    struct CountingLoader {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FormatLoader for CountingLoader {
        async fn load(&self, code: u64) -> Result<Arc<dyn Format>, ResolverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match code {
                DAG_JSON => Ok(Arc::new(DagJsonFormat)),
                JSON => Ok(Arc::new(JsonFormat)),
                _ => Err(ResolverError::Loader(format!("nothing for 0x{code:x}"))),
            }
        }
    }

    #[tokio::test]
    async fn it_rejects_duplicate_registration() -> Result<()> {
        let registry = FormatRegistry::new([Arc::new(DagCborFormat) as Arc<dyn Format>], None)?;

        assert_eq!(
            registry.add(Arc::new(DagCborFormat)),
            Err(ResolverError::already_registered(DAG_CBOR))
        );
        assert!(registry.contains(DAG_CBOR));

        assert!(
            FormatRegistry::new(
                [
                    Arc::new(DagCborFormat) as Arc<dyn Format>,
                    Arc::new(DagCborFormat) as Arc<dyn Format>,
                ],
                None
            )
            .is_err()
        );
        Ok(())
    }

    #[tokio::test]
    async fn it_names_the_format_when_nothing_can_supply_it() -> Result<()> {
        let registry = FormatRegistry::new([], None)?;

        let error = registry.get(DAG_JSON, None).await.unwrap_err();

        assert_eq!(
            error,
            ResolverError::UnknownFormat {
                code: DAG_JSON,
                name: "dag-json".into()
            }
        );
        assert_eq!(error.to_string(), "No format registered for dag-json (0x129)");
        Ok(())
    }

    #[tokio::test]
    async fn it_never_loads_statically_registered_formats() -> Result<()> {
        let loader = Arc::new(CountingLoader::default());
        let registry = FormatRegistry::new(
            [Arc::new(DagCborFormat) as Arc<dyn Format>],
            Some(loader.clone()),
        )?;

        assert_eq!(registry.get(DAG_CBOR, None).await?.code(), DAG_CBOR);
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn it_loads_once_and_caches() -> Result<()> {
        let loader = Arc::new(CountingLoader::default());
        let registry = FormatRegistry::new([], Some(loader.clone()))?;

        assert_eq!(registry.get(DAG_JSON, None).await?.code(), DAG_JSON);
        assert_eq!(registry.get(DAG_JSON, None).await?.code(), DAG_JSON);

        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.codes(), vec![DAG_JSON]);
        Ok(())
    }

    #[tokio::test]
    async fn it_passes_loader_failures_through() -> Result<()> {
        let registry = FormatRegistry::new([], Some(Arc::new(CountingLoader::default())))?;

        assert!(matches!(
            registry.get(0x300001, None).await,
            Err(ResolverError::Loader(_))
        ));
        assert!(!registry.contains(0x300001));
        Ok(())
    }

    #[tokio::test]
    async fn it_accepts_closures_as_loaders() -> Result<()> {
        let loader = |code: u64| async move {
            match code {
                JSON => Ok(Arc::new(JsonFormat) as Arc<dyn Format>),
                _ => Err(ResolverError::unknown_format(code)),
            }
        };
        let registry = FormatRegistry::new([], Some(Arc::new(loader)))?;

        assert_eq!(registry.get(JSON, None).await?.code(), JSON);
        assert!(registry.get(DAG_CBOR, None).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn it_rejects_loaders_that_answer_for_another_code() -> Result<()> {
        let loader =
            |_code: u64| async { Ok::<_, ResolverError>(Arc::new(DagCborFormat) as Arc<dyn Format>) };
        let registry = FormatRegistry::new([], Some(Arc::new(loader)))?;

        assert!(matches!(
            registry.get(JSON, None).await,
            Err(ResolverError::InvalidArgument(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn it_keeps_the_first_registration_when_a_load_races_an_add() -> Result<()> {
        let gate = Arc::new(Notify::new());
        let loader = {
            let gate = gate.clone();
            move |_code: u64| {
                let gate = gate.clone();
                async move {
                    gate.notified().await;
                    Ok::<_, ResolverError>(Arc::new(DagJsonFormat) as Arc<dyn Format>)
                }
            }
        };
        let registry = FormatRegistry::new([], Some(Arc::new(loader)))?;
        let registered: Arc<dyn Format> = Arc::new(DagJsonFormat);

        let add_while_loading = async {
            registry.add(registered.clone())?;
            gate.notify_one();
            Ok::<_, ResolverError>(())
        };

        let (loaded, added) = tokio::join!(registry.get(DAG_JSON, None), add_while_loading);

        added?;
        assert!(Arc::ptr_eq(&loaded?, &registered));
        assert!(Arc::ptr_eq(&registry.get(DAG_JSON, None).await?, &registered));
        Ok(())
    }

    #[tokio::test]
    async fn it_abandons_loading_when_cancelled() -> Result<()> {
        let loader = Arc::new(CountingLoader::default());
        let registry = FormatRegistry::new([], Some(loader.clone()))?;
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(
            registry.get(DAG_JSON, Some(&token)).await.map(|_| ()),
            Err(ResolverError::Cancelled)
        );
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
        assert!(!registry.contains(DAG_JSON));
        Ok(())
    }
}
