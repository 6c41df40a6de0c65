pub mod games;
pub mod logger;
pub mod score_ledger;
pub mod storage;
