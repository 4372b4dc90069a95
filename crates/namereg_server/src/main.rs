use clap::Parser;
use namereg_core::{
    registry::init_registry,
    transport::grpc::{
        DEFAULT_GRPC_PORT, RegistryRouter,
        proto::{REGISTRY_DESCRIPTOR_SET, registry_grpc_server::RegistryGrpcServer},
    },
};
use tonic::transport::Server;
use tonic_reflection::server::Builder;

#[derive(Parser, Debug)]
#[command(name = "namereg_server")]
#[command(about = "Namereg entity registry server")]
struct NameregServerArgs {
    /// Server address to bind to
    #[arg(short, long, default_value = "[::1]")]
    address: String,

    /// Server port to bind to
    #[arg(short, long, default_value_t = DEFAULT_GRPC_PORT)]
    port: u16,

    /// Enable gRPC reflection
    #[arg(short, long, default_value_t = false)]
    reflection: bool,
}

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    namereg_core::logging::init();

    let args = NameregServerArgs::parse();

    let address = format!("{}:{}", args.address, args.port).parse()?;

    let mut server_builder = Server::builder()
        .add_service(RegistryGrpcServer::new(RegistryRouter::new(init_registry())));

    if args.reflection {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(REGISTRY_DESCRIPTOR_SET)
            .build_v1()?;
        server_builder = server_builder.add_service(reflection_service);
    }

    server_builder.serve(address).await?;

    Ok(())
}
