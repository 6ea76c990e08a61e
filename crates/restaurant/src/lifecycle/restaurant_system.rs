use crate::clients::{DishClient, OrderClient};
use crate::config::KitchenConfig;
use crate::ledger::Ledger;
use crate::scheduler::Scheduler;
use crate::service::{MenuService, OrderService};
use crate::{dish_store, order_store};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator of the restaurant backend.
///
/// # Example
///
/// ```ignore
/// let system = RestaurantSystem::new(KitchenConfig::from_env());
///
/// let dish_id = system.menu.add_dish(dish).await?;
/// let order_id = system.orders.place_order(UserId(1), &lines).await?;
///
/// system.shutdown().await?;
/// ```
pub struct RestaurantSystem {
    pub dish_client: DishClient,
    pub order_client: OrderClient,
    pub scheduler: Scheduler,
    pub menu: MenuService,
    pub orders: OrderService,
    ledger: Arc<Ledger>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Spawns the store actors and builds the kitchen with a fresh [`Ledger`].
    pub fn new(config: KitchenConfig) -> Self {
        let ledger = Arc::new(Ledger::new(config.workers));
        Self::with_ledger(config, ledger)
    }

    /// Like [`RestaurantSystem::new`], but credits revenue to an existing ledger.
    /// The kitchen size is taken from the ledger.
    pub fn with_ledger(config: KitchenConfig, ledger: Arc<Ledger>) -> Self {
        let (dish_actor, dish_store) = dish_store::new(config.store_buffer_size);
        let (order_actor, order_store) = order_store::new(config.store_buffer_size);
        let dish_handle = tokio::spawn(dish_actor.run());
        let order_handle = tokio::spawn(order_actor.run());

        let dish_client = DishClient::new(dish_store);
        let order_client = OrderClient::new(order_store);
        let scheduler = Scheduler::new(
            order_client.clone(),
            dish_client.clone(),
            ledger.clone(),
            config.minute,
        );
        let menu = MenuService::new(dish_client.clone(), order_client.clone());
        let orders = OrderService::new(order_client.clone(), dish_client.clone(), scheduler.clone());

        Self {
            dish_client,
            order_client,
            scheduler,
            menu,
            orders,
            ledger,
            handles: vec![dish_handle, order_handle],
        }
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Stops the kitchen, then the stores.
    ///
    /// Returns an error if a store actor panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down restaurant...");
        self.scheduler.shutdown().await;

        // Every holder of a store client has to go before the actors see a closed channel.
        drop(self.orders);
        drop(self.menu);
        drop(self.scheduler);
        drop(self.dish_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store actor failed: {:?}", e);
                return Err(format!("Store actor failed: {:?}", e));
            }
        }

        info!(revenue = self.ledger.revenue(), "Restaurant shutdown complete.");
        Ok(())
    }
}
