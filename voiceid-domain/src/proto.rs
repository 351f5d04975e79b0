//! Generated protobuf types for the domain control-plane API.

#![allow(clippy::enum_variant_names)]

tonic::include_proto!("voiceid.domain.v1");
