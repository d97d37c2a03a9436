/// Network adapters for the cluster API
mod kube_api_client;

pub use kube_api_client::KubeApiClient;
