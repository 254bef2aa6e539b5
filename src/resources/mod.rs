//! Resource kinds served through the selection pipeline

pub mod k8s;
pub mod product;
pub mod rulechain_log;
pub mod secret;

pub use k8s::{ObjectMeta, ResourceKind, TypeMeta};
pub use product::Product;
pub use rulechain_log::RuleChainMsgLog;
pub use secret::{
    ClusterSecret, Secret, SecretAdapter, SecretList, SecretResource, SecretType, to_secret_list,
};
