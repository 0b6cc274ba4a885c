mod ipld;
pub use ipld::*;

mod dag_cbor;
pub use dag_cbor::*;

mod dag_json;
pub use dag_json::*;

mod json;
pub use json::*;
