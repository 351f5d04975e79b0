fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Control-plane API for domains (describe, lifecycle, tagging).
    // The handler is a client only.
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(&["proto/domain.proto"], &["proto"])?;
    Ok(())
}
