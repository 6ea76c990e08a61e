//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real [`StoreClient<T>`] whose requests are answered from a
//! queue of expectations instead of a record map. Code under test cannot tell the
//! difference, which makes it the natural tool for failure injection.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockStore | Real StoreActor |
//! |---------|-----------|-----------------|
//! | **State** | None (scripted answers) | Real records |
//! | **Error Injection** | Easy (`return_err`) | Hard (needs specific state) |
//! | **Use Case** | Failure paths, call-order assertions | Everything else |
//!
//! ## Example
//!
//! ```rust
//! use entity_store::mock::MockStore;
//! use entity_store::{StoreError, StoredEntity};
//!
//! #[derive(Clone, Debug)] struct Table { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("table error")] struct TableError;
//!
//! impl StoredEntity for Table {
//!     type Id = u32; type Action = (); type ActionResult = (); type Error = TableError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn set_id(&mut self, id: u32) { self.id = id; }
//!     fn handle_action(&mut self, _: ()) -> Result<(), TableError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Table>::new();
//!     mock.expect_get(1).return_ok(Some(Table { id: 1 }));
//!     mock.expect_update().return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.get(1).await.unwrap().is_some());
//!     assert!(client.update(Table { id: 1 }).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are consumed strictly in the order they were registered. A request that
//! does not match the next expectation is answered with [`StoreError::ActorDropped`] and
//! recorded as a mismatch, which makes [`MockStore::verify`] panic.
//!
//! ## Hand-driven Tests
//!
//! [`create_mock_client`] returns a client plus the raw request receiver, and the
//! `expect_*` helpers pull the next request off it so a test can inspect the payload and
//! answer it itself.

use crate::client::StoreClient;
use crate::entity::StoredEntity;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: StoredEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Update {
        response: Result<(), StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted store with expectation tracking.
pub struct MockStore<T: StoredEntity> {
    client: StoreClient<T>,
    expectations: Expectations<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoredEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoredEntity> MockStore<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let pending = expectations.clone();
        let misses = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = pending.lock().unwrap().pop_front();
                if let Err(miss) = answer(request, next) {
                    misses.lock().unwrap().push(miss);
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_create(&mut self) -> ResponseBuilder<T, T::Id> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Create {
            response,
        })
    }

    pub fn expect_update(&mut self) -> ResponseBuilder<T, ()> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Update {
            response,
        })
    }

    pub fn expect_list(&mut self) -> ResponseBuilder<T, Vec<T>> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::List {
            response,
        })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if expectations are left over or a request did not match.
    pub fn verify(&self) {
        let misses = self.mismatches.lock().unwrap();
        if !misses.is_empty() {
            panic!("Unexpected requests: {:?}", *misses);
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

fn answer<T: StoredEntity>(
    request: StoreRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Result<(), String> {
    match (request, expectation) {
        (StoreRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            if id != want {
                let _ = respond_to.send(Err(StoreError::ActorDropped));
                return Err(format!("Get({id}) but expected Get({want})"));
            }
            let _ = respond_to.send(response);
        }
        (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (StoreRequest::Update { respond_to, .. }, Some(Expectation::Update { response })) => {
            let _ = respond_to.send(response);
        }
        (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
        }
        (
            StoreRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            if id != want {
                let _ = respond_to.send(Err(StoreError::ActorDropped));
                return Err(format!("Action({id}) but expected Action({want})"));
            }
            let _ = respond_to.send(response);
        }
        (request, _) => {
            let label = describe(&request);
            reject(request);
            return Err(format!("unexpected {label} request"));
        }
    }
    Ok(())
}

fn describe<T: StoredEntity>(request: &StoreRequest<T>) -> &'static str {
    match request {
        StoreRequest::Create { .. } => "Create",
        StoreRequest::Get { .. } => "Get",
        StoreRequest::FindBy { .. } => "FindBy",
        StoreRequest::List { .. } => "List",
        StoreRequest::Update { .. } => "Update",
        StoreRequest::Delete { .. } => "Delete",
        StoreRequest::Action { .. } => "Action",
    }
}

fn reject<T: StoredEntity>(request: StoreRequest<T>) {
    match request {
        StoreRequest::Create { respond_to, .. } => drop(respond_to.send(Err(StoreError::ActorDropped))),
        StoreRequest::Get { respond_to, .. } | StoreRequest::FindBy { respond_to, .. } => {
            drop(respond_to.send(Err(StoreError::ActorDropped)))
        }
        StoreRequest::List { respond_to } => drop(respond_to.send(Err(StoreError::ActorDropped))),
        StoreRequest::Update { respond_to, .. } | StoreRequest::Delete { respond_to, .. } => {
            drop(respond_to.send(Err(StoreError::ActorDropped)))
        }
        StoreRequest::Action { respond_to, .. } => drop(respond_to.send(Err(StoreError::ActorDropped))),
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: StoredEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: StoredEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: StoredEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: StoredEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for expectations that are not keyed by id (`create`, `update`, `list`).
pub struct ResponseBuilder<T: StoredEntity, R> {
    expectations: Expectations<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<T: StoredEntity, R> ResponseBuilder<T, R> {
    fn new(expectations: Expectations<T>, wrap: fn(Result<R, StoreError>) -> Expectation<T>) -> Self {
        Self { expectations, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.expectations.lock().unwrap().push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations.lock().unwrap().push_back((self.wrap)(Err(error)));
    }
}

// =============================================================================
// HAND-DRIVEN HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: StoredEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: StoredEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Update request.
pub async fn expect_update<T: StoredEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Update { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: StoredEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u32,
        table: String,
    }

    #[derive(Debug)]
    enum TicketAction {
        Move(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Ticket error")]
    struct TicketError;

    impl StoredEntity for Ticket {
        type Id = u32;
        type Action = TicketAction;
        type ActionResult = ();
        type Error = TicketError;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn set_id(&mut self, id: u32) {
            self.id = id;
        }

        fn handle_action(&mut self, action: TicketAction) -> Result<(), TicketError> {
            let TicketAction::Move(table) = action;
            self.table = table;
            Ok(())
        }
    }

    fn ticket(id: u32) -> Ticket {
        Ticket {
            id,
            table: "T1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_hand_driven_update() {
        let (client, mut receiver) = create_mock_client::<Ticket>(10);

        let update_task = tokio::spawn(async move { client.update(ticket(7)).await });

        let (entity, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(entity.id, 7);
        responder.send(Err(StoreError::NotFound("7".into()))).unwrap();

        let result = update_task.await.unwrap();
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_hand_driven_get() {
        let (client, mut receiver) = create_mock_client::<Ticket>(10);

        let get_task = tokio::spawn(async move { client.get(5).await });

        let (id, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(id, 5);
        responder.send(Ok(Some(ticket(5)))).unwrap();

        assert_eq!(get_task.await.unwrap().unwrap(), Some(ticket(5)));
    }

    #[tokio::test]
    async fn test_hand_driven_action() {
        let (client, mut receiver) = create_mock_client::<Ticket>(10);

        let action_task = tokio::spawn(async move {
            client
                .perform_action(3, TicketAction::Move("T9".into()))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, 3);
        assert!(matches!(action, TicketAction::Move(ref t) if t == "T9"));
        responder.send(Ok(())).unwrap();

        assert!(action_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mut mock = MockStore::<Ticket>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(ticket(1)));
        mock.expect_list().return_ok(vec![ticket(1)]);

        let client = mock.client();
        assert_eq!(client.create(ticket(0)).await.unwrap(), 1);
        assert_eq!(client.get(1).await.unwrap(), Some(ticket(1)));
        assert_eq!(client.list().await.unwrap().len(), 1);

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests")]
    async fn test_mock_store_flags_unexpected_request() {
        let mut mock = MockStore::<Ticket>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let result = client.delete(1).await;
        assert!(matches!(result, Err(StoreError::ActorDropped)));

        mock.verify();
    }
}
