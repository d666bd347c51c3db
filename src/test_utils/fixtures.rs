use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    Error, assistant::Assistant, datasets::TransactionSource, transaction::RawTransaction,
};

/// A dataset catalog backed by a map, for tests that should not touch disk.
pub(crate) struct InMemorySource {
    datasets: HashMap<String, Vec<RawTransaction>>,
}

impl InMemorySource {
    pub(crate) fn empty() -> Self {
        Self {
            datasets: HashMap::new(),
        }
    }

    pub(crate) fn with_dataset(name: &str, records: Vec<RawTransaction>) -> Self {
        let mut datasets = HashMap::new();
        datasets.insert(name.to_owned(), records);

        Self { datasets }
    }
}

impl TransactionSource for InMemorySource {
    fn dataset_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.datasets.keys().cloned().collect();
        names.sort();

        names
    }

    fn fetch_records(&self, dataset: &str) -> Result<Vec<RawTransaction>, Error> {
        self.datasets
            .get(dataset)
            .cloned()
            .ok_or_else(|| Error::DatasetNotFound(dataset.to_owned()))
    }
}

/// An assistant that records what it was asked and replies with a canned
/// answer.
pub(crate) struct StubAssistant {
    reply: String,
    questions: Mutex<Vec<(String, String)>>,
}

impl StubAssistant {
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_owned(),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// The (question, context) pairs this assistant has been asked, in order.
    pub(crate) fn asked(&self) -> Vec<(String, String)> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl Assistant for StubAssistant {
    async fn ask(&self, question: &str, context: &str) -> String {
        self.questions
            .lock()
            .unwrap()
            .push((question.to_owned(), context.to_owned()));

        self.reply.clone()
    }
}

/// Create a fully populated raw record for the happy path.
pub(crate) fn raw_transaction(
    transaction_id: u64,
    customer_id: u64,
    name: &str,
    date: &str,
    product: &str,
    price: f64,
) -> RawTransaction {
    RawTransaction {
        transaction_id: Some(transaction_id),
        customer_id: Some(customer_id),
        customer_name: Some(name.to_owned()),
        purchase_date: Some(date.to_owned()),
        product_purchased: Some(product.to_owned()),
        price: Some(price),
    }
}
