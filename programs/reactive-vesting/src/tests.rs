//! End-to-end scenarios over the program state, driven the way the `claim`,
//! `create_schedule` and upkeep instructions drive it. Each step works on a
//! copy that is only kept on success, matching transaction rollback.

use std::collections::HashMap;

use anchor_lang::prelude::Pubkey;

use crate::constants::SECONDS_PER_DAY;
use crate::error::{VestingError, VestingResult};
use crate::instructions::quote_release::build_quote;
use crate::state::policy::test_support::FixedPrice;
use crate::state::{
    Deposit, PolicyAction, PolicyParams, PolicyState, ShareBalance, ShareLedger, VestingCore,
    VestingSchedule,
};

const T0: i64 = 1_767_225_600; // 2026-01-01 00:00:00 UTC

#[derive(Clone)]
struct World {
    now: i64,
    core_key: Pubkey,
    core: VestingCore,
    ledger: ShareLedger,
    policy: PolicyState,
    schedules: HashMap<Pubkey, VestingSchedule>,
    shares: HashMap<Pubkey, ShareBalance>,
}

fn empty_schedule() -> VestingSchedule {
    VestingSchedule {
        beneficiary: Pubkey::default(),
        total_amount: 0,
        claimed_amount: 0,
        last_release_time: 0,
        created_at: 0,
        bump: 0,
    }
}

fn empty_balance() -> ShareBalance {
    ShareBalance {
        owner: Pubkey::default(),
        amount: 0,
        bump: 0,
    }
}

impl World {
    fn new(initial_price: u64) -> Self {
        let core_key = Pubkey::new_unique();
        let params = PolicyParams {
            min_period_duration: SECONDS_PER_DAY / 2,
            max_period_duration: 2 * SECONDS_PER_DAY,
            initial_period_duration: SECONDS_PER_DAY,
            tokens_per_period: 100,
        };
        Self {
            now: T0,
            core_key,
            core: VestingCore {
                admin: Pubkey::new_unique(),
                principal_mint: Pubkey::new_unique(),
                vault: Pubkey::new_unique(),
                total_deposited: 0,
                total_claimed: 0,
                schedule_count: 0,
                bump: 255,
            },
            ledger: ShareLedger::new(core_key, 254).unwrap(),
            policy: PolicyState::new(&params, initial_price, T0, 253).unwrap(),
            schedules: HashMap::new(),
            shares: HashMap::new(),
        }
    }

    fn advance(&mut self, secs: i64) {
        self.now += secs;
    }

    fn atomically<T>(
        &mut self,
        op: impl FnOnce(&mut World) -> VestingResult<T>,
    ) -> VestingResult<T> {
        let mut draft = self.clone();
        let out = op(&mut draft)?;
        *self = draft;
        self.assert_invariants();
        Ok(out)
    }

    fn deposit(&mut self, beneficiary: Pubkey, amount: u64) -> VestingResult<Deposit> {
        self.atomically(|w| {
            let now = w.now;
            let schedule = w.schedules.entry(beneficiary).or_insert_with(empty_schedule);
            let kind = schedule.deposit(beneficiary, amount, now, 1)?;
            let balance = w.shares.entry(beneficiary).or_insert_with(empty_balance);
            if !balance.is_open() {
                balance.open(beneficiary, 2);
            }
            w.ledger.mint(&w.core_key, balance, amount)?;
            w.core.record_deposit(amount, kind == Deposit::Opened)?;
            Ok(kind)
        })
    }

    fn claim(&mut self, beneficiary: Pubkey, requested: Option<u64>) -> VestingResult<u64> {
        self.claim_from(beneficiary, beneficiary, requested)
    }

    /// `caller` signs a claim against `beneficiary`'s schedule PDA.
    fn claim_from(
        &mut self,
        caller: Pubkey,
        beneficiary: Pubkey,
        requested: Option<u64>,
    ) -> VestingResult<u64> {
        self.atomically(|w| {
            let now = w.now;
            // a PDA nobody deposited to reads as a blank schedule
            let mut schedule = w
                .schedules
                .get(&beneficiary)
                .cloned()
                .unwrap_or_else(empty_schedule);
            schedule.authorize_claim(&caller)?;
            let params = w.policy.release_params()?;
            let release = schedule.compute_release(now, &params)?;
            let amount = schedule.commit_release(&release, requested)?;
            let balance = w
                .shares
                .get_mut(&beneficiary)
                .ok_or(VestingError::InvalidSchedule)?;
            w.ledger.burn(&w.core_key, balance, amount)?;
            w.core.record_claim(amount)?;
            w.schedules.insert(beneficiary, schedule);
            Ok(amount)
        })
    }

    fn upkeep(&mut self, feed: &FixedPrice) -> VestingResult<PolicyAction> {
        let now = self.now;
        let seen = self.policy.check(feed, now)?.action;
        self.atomically(|w| w.policy.apply(seen, feed, now).map(|c| c.action))
    }

    fn schedule(&self, who: &Pubkey) -> &VestingSchedule {
        &self.schedules[who]
    }

    fn assert_invariants(&self) {
        let mut total = 0u64;
        let mut claimed = 0u64;
        for (who, s) in &self.schedules {
            assert!(s.claimed_amount <= s.total_amount);
            assert_eq!(self.shares[who].amount, s.remaining());
            total += s.total_amount;
            claimed += s.claimed_amount;
        }
        assert_eq!(self.core.total_deposited, total);
        assert_eq!(self.core.total_claimed, claimed);
        assert_eq!(self.core.outstanding(), self.ledger.total_supply);
        assert!(claimed <= total);
        assert_eq!(self.ledger.total_supply, total - claimed);
        assert!(self.policy.period_duration >= self.policy.min_period_duration);
        assert!(self.policy.period_duration <= self.policy.max_period_duration);
    }
}

#[test]
fn three_day_claim_releases_three_periods() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    assert_eq!(w.deposit(alice, 1_000).unwrap(), Deposit::Opened);

    w.advance(3 * SECONDS_PER_DAY + 600);
    assert_eq!(w.claim(alice, None).unwrap(), 300);

    let s = w.schedule(&alice);
    assert_eq!(s.remaining(), 700);
    assert_eq!(s.last_release_time, T0 + 3 * SECONDS_PER_DAY);
    assert_eq!(w.shares[&alice].amount, 700);
}

#[test]
fn partial_claim_advances_full_periods() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    w.deposit(alice, 1_000).unwrap();

    w.advance(3 * SECONDS_PER_DAY);
    assert_eq!(w.claim(alice, Some(50)).unwrap(), 50);
    let s = w.schedule(&alice);
    assert_eq!(s.claimed_amount, 50);
    assert_eq!(s.remaining(), 950);
    assert_eq!(s.last_release_time, T0 + 3 * SECONDS_PER_DAY);

    // the remainder accrues again from the new baseline
    w.advance(SECONDS_PER_DAY);
    assert_eq!(w.claim(alice, None).unwrap(), 100);
}

#[test]
fn immediate_second_claim_is_nothing_to_claim() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    w.deposit(alice, 1_000).unwrap();
    w.advance(2 * SECONDS_PER_DAY);

    assert_eq!(w.claim(alice, None).unwrap(), 200);
    let after_first = (
        w.schedule(&alice).claimed_amount,
        w.schedule(&alice).last_release_time,
    );
    assert!(matches!(
        w.claim(alice, None),
        Err(VestingError::NothingToClaim)
    ));
    assert_eq!(
        after_first,
        (
            w.schedule(&alice).claimed_amount,
            w.schedule(&alice).last_release_time
        )
    );
}

#[test]
fn critical_low_pauses_claims_until_recovery() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    w.deposit(alice, 1_000).unwrap();
    w.advance(2 * SECONDS_PER_DAY);

    let feed = FixedPrice::new(w.policy.critical_low_price);
    assert_eq!(w.policy.check(&feed, w.now).unwrap().action, PolicyAction::Pause);
    assert_eq!(w.upkeep(&feed).unwrap(), PolicyAction::Pause);
    assert!(w.policy.paused);
    assert!(matches!(
        w.claim(alice, None),
        Err(VestingError::VestingPaused)
    ));

    // oscillating below recovery keeps the pause
    for price in [549u64, 510, 549, 520] {
        feed.set(price);
        w.advance(3_600);
        assert!(matches!(
            w.upkeep(&feed),
            Err(VestingError::NoActionRequired)
        ));
        assert!(matches!(
            w.claim(alice, None),
            Err(VestingError::VestingPaused)
        ));
    }

    feed.set(w.policy.recovery_price);
    assert_eq!(w.upkeep(&feed).unwrap(), PolicyAction::Unpause);
    // periods elapsed during the pause are still owed
    assert_eq!(w.claim(alice, None).unwrap(), 200);
}

#[test]
fn accelerated_period_shortens_time_to_next_release() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    w.deposit(alice, 1_000).unwrap();

    let feed = FixedPrice::new(1_200);
    assert_eq!(w.upkeep(&feed).unwrap(), PolicyAction::Accelerate);
    assert_eq!(w.policy.period_duration, SECONDS_PER_DAY * 8 / 10);

    w.advance(SECONDS_PER_DAY * 8 / 10);
    assert_eq!(w.claim(alice, None).unwrap(), 100);
    assert_eq!(
        w.schedule(&alice).last_release_time,
        T0 + SECONDS_PER_DAY * 8 / 10
    );
}

#[test]
fn top_up_keeps_claim_progress_and_share_parity() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    w.deposit(alice, 150).unwrap();
    w.advance(5 * SECONDS_PER_DAY);
    // clamped to what remains
    assert_eq!(w.claim(alice, None).unwrap(), 150);
    assert_eq!(w.schedule(&alice).remaining(), 0);
    assert!(matches!(
        w.claim(alice, None),
        Err(VestingError::NothingToClaim)
    ));

    // a drained schedule is still there and can be topped up
    assert_eq!(w.deposit(alice, 400).unwrap(), Deposit::ToppedUp);
    assert_eq!(w.core.schedule_count, 1);
    assert_eq!(w.shares[&alice].amount, 400);
    w.advance(2 * SECONDS_PER_DAY);
    assert_eq!(w.claim(alice, None).unwrap(), 200);
}

#[test]
fn failed_operations_leave_no_trace() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    let mallory = Pubkey::new_unique();
    w.deposit(alice, 1_000).unwrap();
    w.advance(SECONDS_PER_DAY);

    let before = w.clone();
    assert!(matches!(
        w.claim_from(mallory, alice, None),
        Err(VestingError::NotBeneficiary)
    ));
    assert!(matches!(
        w.claim(mallory, None),
        Err(VestingError::InvalidSchedule)
    ));
    assert!(matches!(
        w.claim(alice, Some(0)),
        Err(VestingError::ZeroAmount)
    ));
    assert!(matches!(
        w.deposit(Pubkey::default(), 10),
        Err(VestingError::ZeroAddress)
    ));
    assert!(matches!(
        w.deposit(alice, 0),
        Err(VestingError::ZeroAmount)
    ));
    assert_eq!(
        w.schedule(&alice).claimed_amount,
        before.schedule(&alice).claimed_amount
    );
    assert_eq!(w.ledger.total_supply, before.ledger.total_supply);
    assert!(!w.schedules.contains_key(&Pubkey::default()));
}

#[test]
fn many_beneficiaries_and_policy_moves_hold_invariants() {
    let mut w = World::new(1_000);
    let people: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
    for (i, who) in people.iter().enumerate() {
        w.deposit(*who, 250 * (i as u64 + 1)).unwrap();
    }

    let feed = FixedPrice::new(1_000);
    let prices = [1_150u64, 1_300, 1_100, 980, 1_500, 1_700, 1_400, 400, 560, 900];
    let mut last_times: HashMap<Pubkey, i64> =
        people.iter().map(|p| (*p, w.schedule(p).last_release_time)).collect();

    for price in prices {
        w.advance(SECONDS_PER_DAY / 2 + 777);
        feed.set(price);
        let _ = w.upkeep(&feed);
        for who in &people {
            let _ = w.claim(*who, Some(70));
            let t = w.schedule(who).last_release_time;
            assert!(t >= last_times[who]);
            last_times.insert(*who, t);
        }
    }
    assert!(w.core.total_claimed > 0);
}

#[test]
fn quote_reports_without_committing() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    w.deposit(alice, 1_000).unwrap();

    let q = build_quote(w.schedule(&alice), &w.policy, w.now).unwrap();
    assert_eq!((q.periods_elapsed, q.releasable), (0, 0));
    assert_eq!(q.next_release_at, T0 + SECONDS_PER_DAY);

    w.advance(2 * SECONDS_PER_DAY + 5);
    let feed = FixedPrice::new(100);
    w.upkeep(&feed).unwrap();
    let q = build_quote(w.schedule(&alice), &w.policy, w.now).unwrap();
    assert!(q.paused);
    assert_eq!(q.releasable, 200);
    assert_eq!(q.remaining, 1_000);
    assert_eq!(q.next_release_at, T0 + 3 * SECONDS_PER_DAY);
    assert_eq!(w.schedule(&alice).claimed_amount, 0);
}

#[test]
fn quote_on_drained_schedule_points_past_now() {
    let mut w = World::new(1_000);
    let alice = Pubkey::new_unique();
    w.deposit(alice, 150).unwrap();
    w.advance(2 * SECONDS_PER_DAY);
    assert_eq!(w.claim(alice, None).unwrap(), 150);

    w.advance(10 * SECONDS_PER_DAY);
    let q = build_quote(w.schedule(&alice), &w.policy, w.now).unwrap();
    assert_eq!((q.releasable, q.remaining), (0, 0));
    assert_eq!(q.periods_elapsed, 10);
    assert_eq!(q.next_release_at, T0 + 13 * SECONDS_PER_DAY);
    assert!(q.next_release_at > w.now);
}
