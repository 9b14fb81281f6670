//! Origin CA root certificate handler.

use serde::Serialize;

use cfctl_core::{CloudflareClient, OriginCaAlgorithm};

use crate::cli::{CertAlgorithm, GlobalOpts, OriginCaRootCertArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct RootCertificate {
    algorithm: OriginCaAlgorithm,
    certificate: String,
}

fn core_algorithm(a: CertAlgorithm) -> OriginCaAlgorithm {
    match a {
        CertAlgorithm::Ecc => OriginCaAlgorithm::Ecc,
        CertAlgorithm::Rsa => OriginCaAlgorithm::Rsa,
    }
}

pub async fn handle(
    client: &CloudflareClient,
    args: &OriginCaRootCertArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let algorithm = core_algorithm(args.algorithm);
    let certificate = client.origin_ca_root_cert(algorithm).await?;
    let root = RootCertificate {
        algorithm,
        certificate,
    };
    // Table and plain both print the bare PEM.
    let out = output::render_single(
        &global.output,
        &root,
        |r| r.certificate.clone(),
        |r| r.certificate.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
