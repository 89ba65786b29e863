//! Check and confirm an order status change

use crate::util;
use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use storefront::{confirmation, Decision, OrderStatus};

pub async fn run(order: &str, from: &str, to: &str, yes: bool) -> Result<()> {
    let from: OrderStatus = from.parse()?;
    let to: OrderStatus = to.parse()?;

    if from == to {
        println!("{}", format!("Order {} is already {}", order, from.label()).dimmed());
        return Ok(());
    }

    if !from.can_transition_to(to) {
        bail!(
            "Order {} cannot go from {} to {}",
            order,
            from.label(),
            to.label()
        );
    }

    let (request, decision) = confirmation(OrderStatus::confirmation_prompt(order, from, to));

    if yes {
        request.affirm();
    } else {
        // Answer on another task; this one just waits for the decision
        tokio::spawn(async move {
            let question = request.prompt().to_string();
            let answer = util::prompt_yes_no(&question).await;
            match answer {
                Ok(true) => request.affirm(),
                Ok(false) => request.decline(),
                Err(e) => {
                    tracing::warn!("Confirmation prompt failed: {:#}", e);
                    request.decline();
                }
            }
        });
    }

    match decision.await {
        Decision::Affirmed => {
            println!("{} Order {} → {}", "✓".green(), order, to.label().green());
        }
        Decision::Declined => {
            println!(
                "{}",
                format!("Cancelled; order {} stays {}", order, from.label()).yellow()
            );
        }
    }

    Ok(())
}
