//! Protobuf messages for the Cosmos SDK query services the exporter reads.
//!
//! Only the fields the exporter consumes are declared. The decoder skips
//! every other field, so these stay wire-compatible with full SDK nodes.

/// Method paths of the three unary RPCs.
pub mod path {
    pub const SIGNING_INFOS: &str = "/cosmos.slashing.v1beta1.Query/SigningInfos";
    pub const VALIDATORS: &str = "/cosmos.staking.v1beta1.Query/Validators";
    pub const GET_LATEST_BLOCK: &str = "/cosmos.base.tendermint.v1beta1.Service/GetLatestBlock";
}

/// cosmos.base.query.v1beta1.PageRequest
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PageRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub offset: u64,
    #[prost(uint64, tag = "3")]
    pub limit: u64,
    #[prost(bool, tag = "4")]
    pub count_total: bool,
    #[prost(bool, tag = "5")]
    pub reverse: bool,
}

/// cosmos.base.query.v1beta1.PageResponse
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PageResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub next_key: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub total: u64,
}

/// cosmos.slashing.v1beta1.ValidatorSigningInfo
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidatorSigningInfo {
    #[prost(string, tag = "1")]
    pub address: ::prost::alloc::string::String,
    #[prost(int64, tag = "2")]
    pub start_height: i64,
    #[prost(int64, tag = "3")]
    pub index_offset: i64,
    #[prost(bool, tag = "5")]
    pub tombstoned: bool,
    #[prost(int64, tag = "6")]
    pub missed_blocks_counter: i64,
}

/// cosmos.slashing.v1beta1.QuerySigningInfosRequest
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QuerySigningInfosRequest {
    #[prost(message, optional, tag = "1")]
    pub pagination: ::core::option::Option<PageRequest>,
}

/// cosmos.slashing.v1beta1.QuerySigningInfosResponse
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QuerySigningInfosResponse {
    #[prost(message, repeated, tag = "1")]
    pub info: ::prost::alloc::vec::Vec<ValidatorSigningInfo>,
    #[prost(message, optional, tag = "2")]
    pub pagination: ::core::option::Option<PageResponse>,
}

/// cosmos.staking.v1beta1.Description
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Description {
    #[prost(string, tag = "1")]
    pub moniker: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub identity: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub website: ::prost::alloc::string::String,
}

/// cosmos.staking.v1beta1.Validator
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Validator {
    #[prost(string, tag = "1")]
    pub operator_address: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub consensus_pubkey: ::core::option::Option<::prost_types::Any>,
    #[prost(bool, tag = "3")]
    pub jailed: bool,
    /// cosmos.staking.v1beta1.BondStatus, kept as its raw value.
    #[prost(int32, tag = "4")]
    pub status: i32,
    #[prost(string, tag = "5")]
    pub tokens: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "7")]
    pub description: ::core::option::Option<Description>,
}

/// cosmos.staking.v1beta1.QueryValidatorsRequest
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryValidatorsRequest {
    /// Empty string lists validators in every status.
    #[prost(string, tag = "1")]
    pub status: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub pagination: ::core::option::Option<PageRequest>,
}

/// cosmos.staking.v1beta1.QueryValidatorsResponse
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryValidatorsResponse {
    #[prost(message, repeated, tag = "1")]
    pub validators: ::prost::alloc::vec::Vec<Validator>,
    #[prost(message, optional, tag = "2")]
    pub pagination: ::core::option::Option<PageResponse>,
}

/// cosmos.crypto.ed25519.PubKey and cosmos.crypto.secp256k1.PubKey share
/// this layout.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}

/// Header fields shared by tendermint.types.Header and the SDK's own header.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Header {
    #[prost(string, tag = "2")]
    pub chain_id: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub height: i64,
}

/// tendermint.types.Block / cosmos.base.tendermint.v1beta1.Block
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<Header>,
}

/// cosmos.base.tendermint.v1beta1.GetLatestBlockRequest
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLatestBlockRequest {}

/// cosmos.base.tendermint.v1beta1.GetLatestBlockResponse
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLatestBlockResponse {
    /// Deprecated by the SDK in favour of `sdk_block`, still served.
    #[prost(message, optional, tag = "2")]
    pub block: ::core::option::Option<Block>,
    #[prost(message, optional, tag = "3")]
    pub sdk_block: ::core::option::Option<Block>,
}
