use silent_auction::{Auction, AuctionError, Attendee, AttendeeId, Item, ItemId, Outcome};

struct Gala {
    auction: Auction,
    piggy_bank: ItemId,
    picture_frame: ItemId,
    cookies: ItemId,
    dogsitting: ItemId,
    stamps: ItemId,
    megan: AttendeeId,
    bob: AttendeeId,
}

fn gala(bob_budget: &str) -> Gala {
    let mut auction = Auction::new();
    let piggy_bank = auction.add_item(Item::new("Chalkware Piggy Bank")).unwrap();
    let picture_frame = auction.add_item(Item::new("Bamboo Picture Frame")).unwrap();
    let cookies = auction
        .add_item(Item::new("Homemade Chocolate Chip Cookies"))
        .unwrap();
    let dogsitting = auction.add_item(Item::new("2 Days Dogsitting")).unwrap();
    let stamps = auction.add_item(Item::new("Forever Stamps")).unwrap();

    let megan = auction.register_attendee(Attendee::from_currency("Megan", "$50"));
    let bob = auction.register_attendee(Attendee::from_currency("Bob", bob_budget));
    auction.register_attendee(Attendee::from_currency("Mike", "$100"));

    auction.place_bid(piggy_bank, megan, 50).unwrap();
    auction.place_bid(piggy_bank, bob, 75).unwrap();
    auction.place_bid(picture_frame, megan, 30).unwrap();
    auction.place_bid(cookies, bob, 20).unwrap();

    Gala {
        auction,
        piggy_bank,
        picture_frame,
        cookies,
        dogsitting,
        stamps,
        megan,
        bob,
    }
}

#[test]
fn test_gala_close_serves_highest_global_bid_first() {
    let mut g = gala("$75");
    let allocation = g.auction.close_auction().unwrap();

    // Bob's 75 tops the ranking and exactly matches his budget, which leaves
    // nothing for his cookie bid.
    assert_eq!(
        allocation.get(g.piggy_bank),
        Some(Outcome::Sold {
            winner: g.bob,
            price: 75
        })
    );
    assert_eq!(
        allocation.get(g.picture_frame),
        Some(Outcome::Sold {
            winner: g.megan,
            price: 30
        })
    );
    assert_eq!(allocation.get(g.cookies), Some(Outcome::NotSold));
    assert_eq!(allocation.get(g.dogsitting), Some(Outcome::NotSold));
    assert_eq!(allocation.get(g.stamps), Some(Outcome::NotSold));

    assert_eq!(g.auction.attendee(g.bob).unwrap().budget(), 0);
    assert_eq!(g.auction.attendee(g.megan).unwrap().budget(), 20);
    assert_eq!(allocation.revenue(), 105);
}

#[test]
fn test_gala_close_when_bob_cannot_afford_piggy_bank() {
    let mut g = gala("$74");
    let allocation = g.auction.close_auction().unwrap();

    let winners: Vec<_> = allocation.iter().map(|(_, o)| o.winner()).collect();
    assert_eq!(
        winners,
        vec![Some(g.megan), None, Some(g.bob), None, None]
    );
    assert_eq!(g.auction.attendee(g.megan).unwrap().budget(), 0);
    assert_eq!(g.auction.attendee(g.bob).unwrap().budget(), 54);
}

#[test]
fn test_allocation_covers_every_item_in_order() {
    let mut g = gala("$75");
    let allocation = g.auction.close_auction().unwrap();

    let ids: Vec<_> = allocation.iter().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec![g.piggy_bank, g.picture_frame, g.cookies, g.dogsitting, g.stamps]
    );
}

#[test]
fn test_not_sold_renders_as_sentinel() {
    let mut g = gala("$75");
    let allocation = g.auction.close_auction().unwrap();
    assert_eq!(allocation.get(g.stamps).unwrap().to_string(), "Not Sold");
}

#[test]
fn test_closing_twice_is_rejected() {
    let mut g = gala("$75");
    g.auction.close_auction().unwrap();

    let err = g.auction.close_auction().unwrap_err();
    assert!(matches!(err, AuctionError::AlreadyClosed));
    assert_eq!(g.auction.attendee(g.megan).unwrap().budget(), 20);
}

#[test]
fn test_empty_auction_round_trip() {
    let mut auction = Auction::new();

    assert!(auction.item_names().is_empty());
    assert!(auction.unpopular_items().is_empty());
    assert_eq!(auction.potential_revenue(), 0);
    assert!(auction.bidders().is_empty());
    assert!(auction.bidder_info().is_empty());
    assert!(auction.close_auction().unwrap().is_empty());
}

/// (budgets, items, bids as (item, attendee, amount))
type Case = (Vec<u64>, usize, Vec<(usize, usize, u64)>);

fn cases() -> Vec<Case> {
    vec![
        (vec![100, 100], 2, vec![(0, 0, 60), (1, 0, 55), (1, 1, 30)]),
        (
            vec![50, 75, 100],
            4,
            vec![
                (0, 0, 40),
                (0, 1, 45),
                (0, 2, 45),
                (1, 2, 60),
                (2, 2, 50),
                (2, 1, 30),
                (3, 0, 10),
            ],
        ),
        (
            vec![10, 10, 10],
            3,
            vec![(0, 0, 10), (1, 0, 10), (2, 0, 10), (0, 1, 5), (2, 2, 11)],
        ),
        (vec![0, 5], 2, vec![(0, 0, 0), (1, 1, 5), (0, 1, 1)]),
        (
            vec![200, 120],
            5,
            vec![
                (0, 0, 90),
                (1, 0, 80),
                (2, 0, 70),
                (3, 1, 65),
                (4, 1, 60),
                (4, 0, 20),
                (2, 1, 55),
            ],
        ),
    ]
}

fn build(case: &Case) -> (Auction, Vec<AttendeeId>, Vec<ItemId>) {
    let (budgets, item_count, bids) = case;
    let mut auction = Auction::new();
    let attendees: Vec<_> = budgets
        .iter()
        .enumerate()
        .map(|(i, b)| auction.register_attendee(Attendee::new(format!("bidder-{}", i), *b)))
        .collect();
    let items: Vec<_> = (0..*item_count)
        .map(|i| auction.add_item(Item::new(format!("lot-{}", i))).unwrap())
        .collect();
    for (item, attendee, amount) in bids {
        auction
            .place_bid(items[*item], attendees[*attendee], *amount)
            .unwrap();
    }
    (auction, attendees, items)
}

#[test]
fn test_closing_never_overspends_a_budget() {
    for case in cases() {
        let (mut auction, attendees, _) = build(&case);
        let starting: Vec<_> = attendees
            .iter()
            .map(|id| auction.attendee(*id).unwrap().budget())
            .collect();

        let allocation = auction.close_auction().unwrap();

        for (attendee, start) in attendees.iter().zip(starting) {
            let spent: u64 = allocation
                .iter()
                .filter_map(|(_, outcome)| match outcome {
                    Outcome::Sold { winner, price } if winner == *attendee => Some(price),
                    _ => None,
                })
                .sum();
            let remaining = auction.attendee(*attendee).unwrap().budget();
            assert!(spent <= start, "case {:?}", case);
            assert_eq!(start - spent, remaining, "case {:?}", case);
        }
    }
}

#[test]
fn test_winning_price_is_the_winners_own_bid() {
    for case in cases() {
        let (mut auction, _, items) = build(&case);
        let snapshot: Vec<Item> = auction.items().to_vec();

        let allocation = auction.close_auction().unwrap();

        for item in items {
            if let Some(Outcome::Sold { winner, price }) = allocation.get(item) {
                assert_eq!(snapshot[item.index()].bid_of(winner), Some(price));
            }
        }
    }
}

#[test]
fn test_unsold_items_had_no_affordable_bid_left() {
    for case in cases() {
        let (mut auction, attendees, items) = build(&case);
        let snapshot: Vec<Item> = auction.items().to_vec();

        let allocation = auction.close_auction().unwrap();

        for item in items {
            if allocation.get(item) == Some(Outcome::NotSold) {
                for attendee in &attendees {
                    if let Some(bid) = snapshot[item.index()].bid_of(*attendee) {
                        // whatever they had left at the end could not cover it
                        assert!(
                            auction.attendee(*attendee).unwrap().budget() < bid,
                            "case {:?}",
                            case
                        );
                    }
                }
            }
        }
    }
}
