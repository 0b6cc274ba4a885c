use ipld_core::cid::Cid;

/// Raw bytes paired with the [Cid] they are addressed by
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    cid: Cid,
    bytes: Vec<u8>,
}

impl Block {
    /// Pair `bytes` with `cid`. The pairing is taken on trust.
    pub fn new(cid: Cid, bytes: Vec<u8>) -> Self {
        Self { cid, bytes }
    }

    /// The identifier of this block
    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    /// The encoded contents of this block
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Split the block back into its parts
    pub fn into_parts(self) -> (Cid, Vec<u8>) {
        (self.cid, self.bytes)
    }
}
