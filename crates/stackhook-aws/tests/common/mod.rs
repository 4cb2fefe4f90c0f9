use async_trait::async_trait;
use stackhook::Reconciler;
use stackhook_aws::error::{Result, classify_aws_error};
use stackhook_aws::{EcsApi, Location, LogsApi, MetricFilterSpec, ResourceTag, SqsApi};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const REGION: &str = "us-east-1";
#[allow(dead_code)]
pub const ACCOUNT_ID: &str = "123456789012";

/// An external call observed by [`FakeAws`]
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    CreateCluster {
        name: String,
        tags: Vec<ResourceTag>,
    },
    DeleteCluster(String),
    PutMetricFilter(MetricFilterSpec),
    DeleteMetricFilter {
        log_group_name: String,
        filter_name: String,
    },
    GetQueueAttribute {
        queue_url: String,
        attribute: String,
    },
    SetQueueAttribute {
        queue_url: String,
        attribute: String,
        value: String,
    },
}

/// In-memory ECS, CloudWatch Logs and SQS.
///
/// Every call is recorded before it is answered. Operations on a name
/// registered with [`FakeAws::fail`] return that error code.
#[derive(Default)]
pub struct FakeAws {
    calls: Mutex<Vec<Call>>,
    clusters: Mutex<BTreeSet<String>>,
    filters: Mutex<BTreeSet<(String, String)>>,
    attributes: Mutex<HashMap<(String, String), String>>,
    failures: Mutex<HashMap<String, String>>,
}

#[allow(dead_code)]
impl FakeAws {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, name: &str, code: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(name.to_string(), code.to_string());
    }

    pub fn heal(&self, name: &str) {
        self.failures.lock().unwrap().remove(name);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn clusters(&self) -> Vec<String> {
        self.clusters.lock().unwrap().iter().cloned().collect()
    }

    pub fn add_filter(&self, log_group_name: &str, filter_name: &str) {
        self.filters
            .lock()
            .unwrap()
            .insert((log_group_name.to_string(), filter_name.to_string()));
    }

    pub fn filter_names(&self) -> Vec<String> {
        self.filters
            .lock()
            .unwrap()
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }

    pub fn set_attribute(&self, queue_url: &str, attribute: &str, value: &str) {
        self.attributes.lock().unwrap().insert(
            (queue_url.to_string(), attribute.to_string()),
            value.to_string(),
        );
    }

    pub fn attribute(&self, queue_url: &str, attribute: &str) -> Option<String> {
        self.attributes
            .lock()
            .unwrap()
            .get(&(queue_url.to_string(), attribute.to_string()))
            .cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, name: &str) -> Result<()> {
        let failures = self.failures.lock().unwrap();
        let Some(code) = failures.get(name) else {
            return Ok(());
        };
        let message = format!("injected failure for {}", name);
        Err(classify_aws_error(Some(code.as_str()), Some(message.as_str())))
    }
}

#[async_trait]
impl EcsApi for FakeAws {
    async fn create_cluster(&self, name: &str, tags: &[ResourceTag]) -> Result<()> {
        self.record(Call::CreateCluster {
            name: name.to_string(),
            tags: tags.to_vec(),
        });
        self.check(name)?;
        self.clusters.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    async fn delete_cluster(&self, name: &str) -> Result<()> {
        self.record(Call::DeleteCluster(name.to_string()));
        self.check(name)?;
        if !self.clusters.lock().unwrap().remove(name) {
            return Err(classify_aws_error(
                Some("ClusterNotFoundException"),
                Some("Cluster not found."),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LogsApi for FakeAws {
    async fn put_metric_filter(&self, filter: &MetricFilterSpec) -> Result<()> {
        self.record(Call::PutMetricFilter(filter.clone()));
        self.check(&filter.filter_name)?;
        self.add_filter(&filter.log_group_name, &filter.filter_name);
        Ok(())
    }

    async fn delete_metric_filter(&self, log_group_name: &str, filter_name: &str) -> Result<()> {
        self.record(Call::DeleteMetricFilter {
            log_group_name: log_group_name.to_string(),
            filter_name: filter_name.to_string(),
        });
        self.check(filter_name)?;
        let removed = self
            .filters
            .lock()
            .unwrap()
            .remove(&(log_group_name.to_string(), filter_name.to_string()));
        if !removed {
            return Err(classify_aws_error(
                Some("ResourceNotFoundException"),
                Some("The specified metric filter does not exist."),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SqsApi for FakeAws {
    async fn get_queue_attribute(
        &self,
        queue_url: &str,
        attribute: &str,
    ) -> Result<Option<String>> {
        self.record(Call::GetQueueAttribute {
            queue_url: queue_url.to_string(),
            attribute: attribute.to_string(),
        });
        self.check(queue_url)?;
        Ok(self.attribute(queue_url, attribute))
    }

    async fn set_queue_attribute(
        &self,
        queue_url: &str,
        attribute: &str,
        value: &str,
    ) -> Result<()> {
        self.record(Call::SetQueueAttribute {
            queue_url: queue_url.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        });
        self.check(queue_url)?;
        self.set_attribute(queue_url, attribute, value);
        Ok(())
    }
}

#[allow(dead_code)]
pub fn location() -> Location {
    Location::new(REGION, ACCOUNT_ID)
}

/// Reconciler with every AWS handler wired to `aws`
#[allow(dead_code)]
pub fn reconciler(aws: &Arc<FakeAws>) -> Reconciler {
    Reconciler::new(stackhook_aws::registry(
        aws.clone(),
        aws.clone(),
        location(),
    ))
}
