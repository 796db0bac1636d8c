use crate::core::auction::Auction;
use crate::domain::model::{Allocation, Amount, AttendeeId, ItemId, Outcome};
use crate::domain::ports::Clock;
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidderSummary {
    pub name: String,
    pub budget: Amount,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResult {
    pub item: String,
    pub result: String,
    pub winner: Option<String>,
    pub price: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetLine {
    pub name: String,
    pub budget: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosingSummary {
    pub results: Vec<ItemResult>,
    pub raised: Amount,
    pub remaining_budgets: Vec<BudgetLine>,
}

/// Everything the CLI prints about one auction, with ids resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuctionReport {
    pub name: String,
    pub date: String,
    pub items: Vec<String>,
    pub unpopular_items: Vec<String>,
    pub potential_revenue: Amount,
    pub bidders: Vec<String>,
    pub bidder_info: Vec<BidderSummary>,
    pub closing: Option<ClosingSummary>,
}

impl AuctionReport {
    /// Snapshot of the read-models of an auction that may still be open.
    pub fn open(name: &str, auction: &Auction, clock: &dyn Clock) -> Self {
        let bidder_info = auction
            .bidder_info()
            .iter()
            .map(|(id, info)| BidderSummary {
                name: attendee_name(auction, id),
                budget: info.budget,
                items: info.items.iter().map(|i| item_name(auction, *i)).collect(),
            })
            .collect();

        Self {
            name: name.to_string(),
            date: auction.date_with(clock),
            items: auction.item_names().into_iter().map(str::to_string).collect(),
            unpopular_items: auction
                .unpopular_items()
                .into_iter()
                .map(|item| item.name().to_string())
                .collect(),
            potential_revenue: auction.potential_revenue(),
            bidders: auction.bidders().into_iter().map(str::to_string).collect(),
            bidder_info,
            closing: None,
        }
    }

    /// Attaches closing results; `auction` must be the one that produced them.
    pub fn with_closing(mut self, auction: &Auction, allocation: &Allocation) -> Self {
        let results = allocation
            .iter()
            .map(|(item, outcome)| {
                let winner = outcome.winner().map(|id| attendee_name(auction, id));
                ItemResult {
                    item: item_name(auction, item),
                    result: winner.clone().unwrap_or_else(|| Outcome::NotSold.to_string()),
                    winner,
                    price: match outcome {
                        Outcome::Sold { price, .. } => Some(price),
                        Outcome::NotSold => None,
                    },
                }
            })
            .collect();

        let remaining_budgets = auction
            .attendees()
            .iter()
            .map(|a| BudgetLine {
                name: a.name().to_string(),
                budget: a.budget(),
            })
            .collect();

        self.closing = Some(ClosingSummary {
            results,
            raised: allocation.revenue(),
            remaining_budgets,
        });
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out).expect("writing to a String never fails");
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "{} ({})", self.name, self.date)?;
        writeln!(out)?;
        writeln!(out, "Items:")?;
        for item in &self.items {
            writeln!(out, "  - {}", item)?;
        }
        writeln!(out, "Unpopular items: {}", join_or_none(&self.unpopular_items))?;
        writeln!(out, "Potential revenue: ${}", self.potential_revenue)?;
        writeln!(out, "Bidders: {}", join_or_none(&self.bidders))?;
        for bidder in &self.bidder_info {
            writeln!(
                out,
                "  {} (budget ${}): {}",
                bidder.name,
                bidder.budget,
                bidder.items.join(", ")
            )?;
        }

        if let Some(closing) = &self.closing {
            writeln!(out)?;
            writeln!(out, "Results:")?;
            for result in &closing.results {
                match result.price {
                    Some(price) => {
                        writeln!(out, "  {} => {} (${})", result.item, result.result, price)?
                    }
                    None => writeln!(out, "  {} => {}", result.item, result.result)?,
                }
            }
            writeln!(out, "Raised: ${}", closing.raised)?;
            writeln!(out, "Remaining budgets:")?;
            for line in &closing.remaining_budgets {
                writeln!(out, "  {}: ${}", line.name, line.budget)?;
            }
        }
        Ok(())
    }
}

/// Builds the report for an auction, closing it first when `close` is set.
pub fn run_auction(
    name: &str,
    auction: &mut Auction,
    close: bool,
    clock: &dyn Clock,
) -> Result<AuctionReport> {
    let report = AuctionReport::open(name, auction, clock);
    if !close {
        return Ok(report);
    }
    let allocation = auction.close_auction()?;
    Ok(report.with_closing(auction, &allocation))
}

fn attendee_name(auction: &Auction, id: AttendeeId) -> String {
    auction
        .attendee(id)
        .map(|a| a.name().to_string())
        .unwrap_or_else(|| format!("attendee #{}", id.index()))
}

fn item_name(auction: &Auction, id: ItemId) -> String {
    auction
        .item(id)
        .map(|i| i.name().to_string())
        .unwrap_or_else(|| format!("item #{}", id.index()))
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}
