use entity_store::{StoreActor, StoreError, StoredEntity};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ingredient {
    id: u32,
    name: String,
    grams: u32,
}

#[derive(Debug)]
enum IngredientAction {
    Take(u32),
}

#[derive(Debug, thiserror::Error)]
enum IngredientError {
    #[error("Not enough {name}: {available}g left")]
    Shortage { name: String, available: u32 },
    #[error("Ingredient name must not be empty")]
    EmptyName,
}

impl StoredEntity for Ingredient {
    type Id = u32;
    type Action = IngredientAction;
    type ActionResult = u32;
    type Error = IngredientError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    fn on_create(&mut self) -> Result<(), IngredientError> {
        if self.name.is_empty() {
            return Err(IngredientError::EmptyName);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: IngredientAction) -> Result<u32, IngredientError> {
        match action {
            IngredientAction::Take(grams) => {
                if grams > self.grams {
                    return Err(IngredientError::Shortage {
                        name: self.name.clone(),
                        available: self.grams,
                    });
                }
                self.grams -= grams;
                Ok(self.grams)
            }
        }
    }
}

fn ingredient(name: &str, grams: u32) -> Ingredient {
    Ingredient {
        id: 0,
        name: name.into(),
        grams,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = StoreActor::new(10);
    tokio::spawn(actor.run());

    // 1. Create
    let flour = client.create(ingredient("flour", 500)).await.unwrap();
    let sugar = client.create(ingredient("sugar", 200)).await.unwrap();
    assert_eq!(flour, 1); // First ID should be 1
    assert_eq!(sugar, 2);

    // 2. Action
    let left = client
        .perform_action(flour, IngredientAction::Take(120))
        .await
        .unwrap();
    assert_eq!(left, 380);

    let stored = client.get(flour).await.unwrap().unwrap();
    assert_eq!(stored.grams, 380);

    // 3. Update
    let mut renamed = stored.clone();
    renamed.name = "rye flour".into();
    client.update(renamed).await.unwrap();
    let found = client.find_by("name", "rye flour").await.unwrap();
    assert_eq!(found.map(|i| i.id), Some(flour));

    // 4. List in id order
    let all = client.list().await.unwrap();
    assert_eq!(all.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);

    // 5. Delete
    client.delete(flour).await.unwrap();
    assert!(client.get(flour).await.unwrap().is_none());
    assert!(matches!(
        client.delete(flour).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_action_error_leaves_record_untouched() {
    let (actor, client) = StoreActor::new(10);
    tokio::spawn(actor.run());

    let id = client.create(ingredient("salt", 10)).await.unwrap();
    let err = client
        .perform_action(id, IngredientAction::Take(11))
        .await
        .unwrap_err();

    match err.entity_error::<IngredientError>() {
        Some(IngredientError::Shortage { available, .. }) => assert_eq!(*available, 10),
        other => panic!("Expected Shortage, got {other:?}"),
    }
    assert_eq!(client.get(id).await.unwrap().unwrap().grams, 10);
}

#[tokio::test]
async fn test_rejected_create_does_not_consume_id() {
    let (actor, client) = StoreActor::new(10);
    tokio::spawn(actor.run());

    let err = client.create(ingredient("", 1)).await.unwrap_err();
    assert!(matches!(
        err.entity_error::<IngredientError>(),
        Some(IngredientError::EmptyName)
    ));

    let id = client.create(ingredient("pepper", 1)).await.unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn test_update_missing_record() {
    let (actor, client) = StoreActor::new(10);
    tokio::spawn(actor.run());

    let mut ghost = ingredient("ghost", 1);
    ghost.id = 42;
    assert!(matches!(
        client.update(ghost).await,
        Err(StoreError::NotFound(id)) if id == "42"
    ));
}

#[tokio::test]
async fn test_client_after_actor_stops() {
    let (actor, client) = StoreActor::<Ingredient>::new(10);
    drop(actor);

    assert!(matches!(client.list().await, Err(StoreError::ActorClosed)));
}
