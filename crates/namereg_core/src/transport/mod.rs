//! Transport layer exposing the registry's admin API to the outside world.
//!
//! The only wire surface is gRPC; everything transport-specific (proto
//! conversions, status mapping, the server router) lives in [`grpc`], so the
//! registry core stays free of wire concerns.

pub mod grpc;
