//! # Restaurant Kitchen Demo
//!
//! Runs the whole backend in-process:
//! 1.  Sets up the [`RestaurantSystem`].
//! 2.  Adds a few dishes to the menu.
//! 3.  Places orders, cancels one, then pays and rates another once it is ready.
//!
//! Cooking minutes last `KITCHEN_MINUTE_MS` milliseconds (see [`KitchenConfig`]).

use restaurant::config::KitchenConfig;
use restaurant::lifecycle::{setup_tracing, RestaurantSystem};
use restaurant::model::{DishCreate, LineItem, OrderStatus, UserId};
use std::time::Duration;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = KitchenConfig::from_env();
    info!(?config, "Starting restaurant");
    let system = RestaurantSystem::new(config.clone());

    let span = tracing::info_span!("menu_setup");
    let (soup, pasta) = async {
        let soup = system
            .menu
            .add_dish(DishCreate {
                name: "Tomato soup".to_string(),
                description: "With basil".to_string(),
                quantity: 20,
                cooking_time_minutes: 3,
                price: 6.5,
            })
            .await
            .map_err(|e| e.to_string())?;
        let pasta = system
            .menu
            .add_dish(DishCreate {
                name: "Carbonara".to_string(),
                description: "Guanciale, pecorino".to_string(),
                quantity: 10,
                cooking_time_minutes: 5,
                price: 13.0,
            })
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((soup, pasta))
    }
    .instrument(span)
    .await?;

    let alice = UserId(1);
    let bob = UserId(2);

    let dinner = system
        .orders
        .place_order(
            alice,
            &[
                LineItem {
                    dish_id: soup,
                    quantity: 2,
                },
                LineItem {
                    dish_id: pasta,
                    quantity: 1,
                },
            ],
        )
        .await
        .map_err(|e| e.to_string())?;
    let lunch = system
        .orders
        .place_order(
            bob,
            &[LineItem {
                dish_id: pasta,
                quantity: 2,
            }],
        )
        .await
        .map_err(|e| e.to_string())?;

    if let Err(e) = system.orders.cancel_order(lunch).await {
        error!(order_id = %lunch, error = %e, "Cancel failed");
    }

    // 2 × 3 + 1 × 5 cooking minutes
    tokio::time::sleep(config.minute * 11 + Duration::from_millis(100)).await;

    let order = system.orders.order(dinner).await.map_err(|e| e.to_string())?;
    if order.status() == OrderStatus::Ready {
        system
            .orders
            .pay_order(dinner)
            .await
            .map_err(|e| e.to_string())?;
        system
            .orders
            .rate_order(dinner, 5, "Lovely carbonara")
            .await
            .map_err(|e| e.to_string())?;
    } else {
        error!(order_id = %dinner, status = %order.status(), "Order not ready in time");
    }

    for order in system.orders.all_orders().await.map_err(|e| e.to_string())? {
        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            status = %order.status(),
            price = order.price(),
            "Final order state"
        );
    }
    info!(revenue = system.ledger().revenue(), "Revenue");

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
