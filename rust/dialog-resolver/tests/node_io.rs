mod common;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use common::{make_resolver, map};
use dialog_blockstore::{Block, BlockStore, BlockStoreError, MemoryBlockStore};
use dialog_format::{
    Cid, CidOptions, CidVersion, DAG_CBOR, DAG_JSON, DAG_PB, DagCborFormat, DagJsonFormat,
    Format, HashAlgorithm, Ipld,
};
use dialog_resolver::{PutOptions, Resolver, ResolverError, ResolverOptions};
use futures_util::{StreamExt, TryStreamExt, pin_mut};
use pretty_assertions::assert_eq;

fn sample(index: i128) -> Ipld {
    map([
        ("index", Ipld::Integer(index)),
        ("label", Ipld::String(format!("node {index}"))),
    ])
}

#[tokio::test]
async fn it_round_trips_nodes_through_each_format() -> Result<()> {
    let resolver = make_resolver()?;
    let node = sample(1);

    for (codec, format) in [
        (DAG_CBOR, Arc::new(DagCborFormat) as Arc<dyn Format>),
        (DAG_JSON, Arc::new(DagJsonFormat) as Arc<dyn Format>),
    ] {
        let cid = resolver.put(&node, codec, &PutOptions::default()).await?;

        let expected = format.cid(&format.serialize(&node)?, &CidOptions::default())?;
        assert_eq!(cid, expected);
        assert_eq!(cid.version(), dialog_format::cid::Version::V1);
        assert_eq!(cid.codec(), codec);
        assert_eq!(cid.hash().code(), HashAlgorithm::Sha2_256.code());
        assert_eq!(resolver.get(&cid, None).await?, node);
    }
    Ok(())
}

#[tokio::test]
async fn it_derives_cids_with_the_requested_hash() -> Result<()> {
    let resolver = make_resolver()?;
    let options = PutOptions {
        hash: Some(HashAlgorithm::Blake3),
        ..Default::default()
    };

    let cid = resolver.put(&sample(2), DAG_CBOR, &options).await?;

    assert_eq!(cid.hash().code(), HashAlgorithm::Blake3.code());
    assert_eq!(resolver.get(&cid, None).await?, sample(2));
    Ok(())
}

#[tokio::test]
async fn it_never_writes_when_only_hashing() -> Result<()> {
    let resolver = make_resolver()?;
    let options = PutOptions {
        only_hash: true,
        ..Default::default()
    };

    let hashed = resolver.put(&sample(3), DAG_CBOR, &options).await?;

    assert_eq!(resolver.store().writes(), 0);
    assert_eq!(
        resolver.get(&hashed, None).await,
        Err(ResolverError::NotFound(hashed))
    );

    let stored = resolver
        .put(&sample(3), DAG_CBOR, &PutOptions::default())
        .await?;
    assert_eq!(stored, hashed);
    assert_eq!(resolver.store().writes(), 1);
    Ok(())
}

#[tokio::test]
async fn it_rejects_cid_v0_before_touching_the_store() -> Result<()> {
    let resolver = make_resolver()?;
    let v0 = PutOptions {
        cid_version: Some(CidVersion::V0),
        ..Default::default()
    };

    let result = resolver.put(&sample(4), DAG_CBOR, &v0).await;
    assert!(matches!(result, Err(ResolverError::InvalidArgument(_))));

    let result = resolver
        .put(
            &sample(4),
            DAG_PB,
            &PutOptions {
                hash: Some(HashAlgorithm::Blake3),
                ..v0
            },
        )
        .await;
    assert!(matches!(result, Err(ResolverError::InvalidArgument(_))));

    assert_eq!(resolver.store().reads(), 0);
    assert_eq!(resolver.store().writes(), 0);
    Ok(())
}

#[tokio::test]
async fn it_names_the_codec_it_has_no_format_for() -> Result<()> {
    let resolver = make_resolver()?;

    let result = resolver
        .put(&sample(5), DAG_PB, &PutOptions::default())
        .await;

    assert_eq!(
        result,
        Err(ResolverError::UnknownFormat {
            code: DAG_PB,
            name: "dag-pb".into()
        })
    );
    Ok(())
}

#[tokio::test]
async fn it_puts_many_nodes_lazily_and_in_order() -> Result<()> {
    let resolver = make_resolver()?;
    let nodes: Vec<Ipld> = (0..3).map(sample).collect();

    let cids = resolver.put_many(nodes.clone(), DAG_CBOR, PutOptions::default());
    assert_eq!(resolver.store().writes(), 0);

    pin_mut!(cids);
    let first = cids.next().await.transpose()?;
    assert_eq!(resolver.store().writes(), 1);

    let mut all: Vec<Cid> = first.into_iter().collect();
    all.extend(cids.try_collect::<Vec<_>>().await?);
    assert_eq!(all.len(), 3);

    for (cid, node) in all.iter().zip(&nodes) {
        let expected = resolver
            .put(node, DAG_CBOR, &PutOptions {
                only_hash: true,
                ..Default::default()
            })
            .await?;
        assert_eq!(cid, &expected);
    }

    let read_back: Vec<Ipld> = resolver.get_many(all, None).try_collect().await?;
    assert_eq!(read_back, nodes);
    Ok(())
}

#[tokio::test]
async fn it_reports_an_unknown_format_when_put_many_is_first_polled() -> Result<()> {
    let resolver = make_resolver()?;

    let cids = resolver.put_many(Vec::new(), DAG_PB, PutOptions::default());
    pin_mut!(cids);

    assert!(matches!(
        cids.next().await,
        Some(Err(ResolverError::UnknownFormat { code: DAG_PB, .. }))
    ));
    Ok(())
}

#[tokio::test]
async fn it_fails_get_many_at_the_missing_element() -> Result<()> {
    let resolver = make_resolver()?;
    let present = resolver
        .put(&sample(6), DAG_CBOR, &PutOptions::default())
        .await?;
    let absent = resolver
        .put(&sample(7), DAG_CBOR, &PutOptions {
            only_hash: true,
            ..Default::default()
        })
        .await?;

    let nodes = resolver.get_many([present, absent, present], None);
    pin_mut!(nodes);

    assert_eq!(nodes.next().await, Some(Ok(sample(6))));
    assert_eq!(resolver.store().reads(), 1);
    assert_eq!(nodes.next().await, Some(Err(ResolverError::NotFound(absent))));
    assert_eq!(nodes.next().await, None);
    Ok(())
}

#[tokio::test]
async fn it_removes_nodes() -> Result<()> {
    let resolver = make_resolver()?;
    let cid = resolver
        .put(&sample(8), DAG_CBOR, &PutOptions::default())
        .await?;

    resolver.remove(&cid, None).await?;

    assert_eq!(resolver.get(&cid, None).await, Err(ResolverError::NotFound(cid)));
    assert!(!resolver.store().inner().contains(&cid).await);
    Ok(())
}

/// A store that refuses to delete one particular block
#[derive(Clone)]
struct StubbornStore {
    inner: MemoryBlockStore,
    stubborn: Cid,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl BlockStore for StubbornStore {
    async fn get(&self, cid: &Cid) -> Result<Option<Vec<u8>>, BlockStoreError> {
        self.inner.get(cid).await
    }

    async fn put(&self, block: Block) -> Result<(), BlockStoreError> {
        self.inner.put(block).await
    }

    async fn delete(&self, cid: &Cid) -> Result<(), BlockStoreError> {
        if cid == &self.stubborn {
            return Err(BlockStoreError::Backend("delete refused".into()));
        }
        self.inner.delete(cid).await
    }
}

#[tokio::test]
async fn it_leaves_earlier_removals_applied_when_one_fails() -> Result<()> {
    let scratch = make_resolver()?;
    let options = PutOptions {
        only_hash: true,
        ..Default::default()
    };
    let first = scratch.put(&sample(9), DAG_CBOR, &options).await?;
    let second = scratch.put(&sample(10), DAG_CBOR, &options).await?;
    let third = scratch.put(&sample(11), DAG_CBOR, &options).await?;

    let memory = MemoryBlockStore::default();
    let resolver = Resolver::new(
        StubbornStore {
            inner: memory.clone(),
            stubborn: second,
        },
        ResolverOptions::default().with_format(Arc::new(DagCborFormat)),
    )?;
    let stored: Vec<Cid> = resolver
        .put_many(
            [sample(9), sample(10), sample(11)],
            DAG_CBOR,
            PutOptions::default(),
        )
        .try_collect()
        .await?;
    assert_eq!(stored, vec![first, second, third]);

    let result = resolver.remove_many([first, second, third], None).await;

    assert_eq!(result, Err(ResolverError::Storage("delete refused".into())));
    assert!(!memory.contains(&first).await);
    assert!(memory.contains(&second).await);
    assert!(memory.contains(&third).await);
    Ok(())
}

#[tokio::test]
async fn it_loads_missing_formats_on_demand() -> Result<()> {
    let resolver = Resolver::new(
        MemoryBlockStore::default(),
        ResolverOptions::default()
            .with_format(Arc::new(DagCborFormat))
            .with_loader(Arc::new(|code: u64| async move {
                match code {
                    DAG_JSON => Ok::<_, ResolverError>(Arc::new(DagJsonFormat) as Arc<dyn Format>),
                    _ => Err(ResolverError::unknown_format(code)),
                }
            })),
    )?;
    assert!(!resolver.registry().contains(DAG_JSON));

    let cid = resolver
        .put(&sample(12), DAG_JSON, &PutOptions::default())
        .await?;

    assert!(resolver.registry().contains(DAG_JSON));
    assert_eq!(resolver.get(&cid, None).await?, sample(12));
    assert_eq!(
        resolver.put(&sample(12), DAG_PB, &PutOptions::default()).await,
        Err(ResolverError::unknown_format(DAG_PB))
    );
    Ok(())
}

#[tokio::test]
async fn it_forgets_formats_that_are_removed() -> Result<()> {
    let resolver = make_resolver()?;
    let cid = resolver
        .put(&sample(13), DAG_JSON, &PutOptions::default())
        .await?;

    assert_eq!(
        resolver.add_format(Arc::new(DagJsonFormat)),
        Err(ResolverError::already_registered(DAG_JSON))
    );

    resolver.remove_format(DAG_JSON);
    resolver.remove_format(DAG_JSON);

    assert_eq!(
        resolver.get(&cid, None).await,
        Err(ResolverError::unknown_format(DAG_JSON))
    );

    resolver.add_format(Arc::new(DagJsonFormat))?;
    assert_eq!(resolver.get(&cid, None).await?, sample(13));
    Ok(())
}
