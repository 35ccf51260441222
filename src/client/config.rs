//! Registry client configuration

use crate::crypto::cosmos::ChainConfig;
use crate::tx::{BroadcastMode, Fee};
use tracing::warn;

/// 체인 ID 환경 변수
pub const ENV_CHAIN_ID: &str = "REGISTRY_CHAIN_ID";
/// Cosmos 체인 ID 환경 변수
pub const ENV_COSMOS_CHAIN_ID: &str = "REGISTRY_COSMOS_CHAIN_ID";
/// 수수료 금액 환경 변수
pub const ENV_FEE_AMOUNT: &str = "REGISTRY_FEE_AMOUNT";
/// 수수료 단위 환경 변수
pub const ENV_FEE_DENOM: &str = "REGISTRY_FEE_DENOM";
/// 가스 한도 환경 변수
pub const ENV_FEE_GAS: &str = "REGISTRY_FEE_GAS";

/// 레지스트리 클라이언트 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    chain: ChainConfig,
    fee: Fee,
    memo: String,
    broadcast_mode: BroadcastMode,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryConfig {
    /// 기본 설정 생성 (로컬 Ethermint 체인, 20aphoton / 200000 gas)
    pub fn new() -> Self {
        Self {
            chain: ChainConfig::ethermint_local(),
            fee: Fee::default(),
            memo: String::new(),
            broadcast_mode: BroadcastMode::Block,
        }
    }

    /// 환경 변수로 기본값 덮어쓰기
    ///
    /// 값이 없거나 파싱할 수 없으면 기본값을 유지합니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정 구성
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup(ENV_CHAIN_ID) {
            match raw.parse::<u64>() {
                Ok(chain_id) => config.chain.chain_id = chain_id,
                Err(e) => warn!(key = ENV_CHAIN_ID, value = %raw, error = %e, "ignoring invalid setting"),
            }
        }
        if let Some(cosmos_chain_id) = lookup(ENV_COSMOS_CHAIN_ID) {
            config.chain.cosmos_chain_id = cosmos_chain_id;
        }
        if let Some(amount) = lookup(ENV_FEE_AMOUNT) {
            config.fee.amount = amount;
        }
        if let Some(denom) = lookup(ENV_FEE_DENOM) {
            config.fee.denom = denom;
        }
        if let Some(raw) = lookup(ENV_FEE_GAS) {
            match raw.parse::<u64>() {
                Ok(gas) => config.fee.gas = gas,
                Err(e) => warn!(key = ENV_FEE_GAS, value = %raw, error = %e, "ignoring invalid setting"),
            }
        }

        config
    }

    /// 체인 설정
    pub fn with_chain(mut self, chain: ChainConfig) -> Self {
        self.chain = chain;
        self
    }

    /// 기본 수수료 설정
    pub fn with_fee(mut self, fee: Fee) -> Self {
        self.fee = fee;
        self
    }

    /// 메모 설정
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// 브로드캐스트 모드 설정
    pub fn with_broadcast_mode(mut self, mode: BroadcastMode) -> Self {
        self.broadcast_mode = mode;
        self
    }

    // === Getters ===

    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    pub fn fee(&self) -> &Fee {
        &self.fee
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn broadcast_mode(&self) -> BroadcastMode {
        self.broadcast_mode
    }
}
