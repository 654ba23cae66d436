use std::sync::Arc;

use iiifbox::config::Config;
use iiifbox::importer::{IiifImporter, ImportTask};
use iiifbox::transport::ReqwestTransport;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn importer(config: &Config, manifest_uri: String) -> Result<IiifImporter, AnyError> {
    let transport = ReqwestTransport::new(config.http.to_http_config())?;
    Ok(config.importer(manifest_uri, Arc::new(transport)))
}

pub async fn count(config: &Config, manifest_uri: String) -> Result<(), AnyError> {
    let count = importer(config, manifest_uri)?.count_tasks().await?;
    println!("{}", count);
    Ok(())
}

pub async fn tasks(config: &Config, manifest_uri: String, pretty: bool) -> Result<(), AnyError> {
    let tasks: Vec<ImportTask> = importer(config, manifest_uri)?
        .tasks()
        .await?
        .into_iter()
        .map(ImportTask::from)
        .collect();

    let output = if pretty {
        serde_json::to_string_pretty(&tasks)?
    } else {
        serde_json::to_string(&tasks)?
    };

    println!("{}", output);
    Ok(())
}
