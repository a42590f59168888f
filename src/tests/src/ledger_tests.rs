//! Tests for the ledger state machine.

use meow_core::{
    AccountId, Call, Field, FieldValue, LedgerError, LedgerEvent, TokenEvent, TokenLedger,
    INITIAL_SUPPLY,
};
use rand::Rng;

fn random_account() -> AccountId {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes);
    AccountId::new(bytes)
}

/// Deploys a ledger and returns it with the deployer and a second account.
fn deploy() -> (TokenLedger, AccountId, AccountId) {
    let deployer = random_account();
    let sender = random_account();
    let mut ledger = TokenLedger::new();
    ledger.initialize(deployer).unwrap();
    (ledger, deployer, sender)
}

/// Tests the record written at deployment.
#[test]
fn test_deploys_with_initial_supply() {
    let (ledger, deployer, _) = deploy();

    assert_eq!(ledger.total_supply().unwrap(), 1_000_000_000_000);
    assert_eq!(ledger.get_balance(&deployer).unwrap(), 1_000_000_000_000);
    assert!(!ledger.is_paused().unwrap());
    assert_eq!(ledger.owner().unwrap(), deployer);
}

/// Tests that a transfer leaves the shared balance unchanged but still emits.
#[test]
fn test_transfer_is_net_zero_and_emits() {
    let (mut ledger, deployer, sender) = deploy();

    ledger.transfer(deployer, sender, 1000).unwrap();

    assert_eq!(ledger.get_balance(&deployer).unwrap(), INITIAL_SUPPLY);
    assert_eq!(ledger.total_supply().unwrap(), INITIAL_SUPPLY);
    assert_eq!(
        ledger.drain_events(),
        vec![LedgerEvent::Transfer(TokenEvent {
            from: deployer,
            to: sender,
            amount: 1000,
        })]
    );
}

/// Tests that any account may transfer from the shared balance.
#[test]
fn test_non_owner_can_transfer() {
    let (mut ledger, deployer, sender) = deploy();
    ledger.transfer(sender, deployer, 1).unwrap();
    assert_eq!(ledger.drain_events()[0].payload().from, sender);
}

/// Tests transfers exceeding the balance.
#[test]
fn test_transfer_exceeding_balance() {
    let (mut ledger, deployer, sender) = deploy();

    assert_eq!(
        ledger.transfer(deployer, sender, 1_000_000_000_001),
        Err(LedgerError::InsufficientBalance {
            required: 1_000_000_000_001,
            available: INITIAL_SUPPLY,
        })
    );
    assert!(ledger.drain_events().is_empty());
}

/// Tests that every amount above the balance is rejected, up to u64::MAX.
#[test]
fn test_any_amount_above_balance_is_rejected() {
    let (mut ledger, deployer, sender) = deploy();
    let mut rng = rand::thread_rng();

    let mut amounts: Vec<u64> = (0..64).map(|_| rng.gen_range(INITIAL_SUPPLY + 1..=u64::MAX)).collect();
    amounts.push(INITIAL_SUPPLY + 1);
    amounts.push(u64::MAX);

    for amount in amounts {
        assert!(matches!(
            ledger.transfer(deployer, sender, amount),
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert!(matches!(
            ledger.burn(deployer, amount),
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }
    assert_eq!(ledger.state().unwrap().version, 0);
}

/// Tests transfers and burns while paused.
#[test]
fn test_paused_rejects_spending() {
    let (mut ledger, deployer, sender) = deploy();
    ledger.pause(deployer).unwrap();

    for caller in [deployer, sender] {
        assert_eq!(ledger.transfer(caller, sender, 1000), Err(LedgerError::Paused));
        assert_eq!(ledger.burn(caller, 1000), Err(LedgerError::Paused));
        assert_eq!(ledger.burn(caller, 0), Err(LedgerError::Paused));
    }
    assert_eq!(ledger.total_supply().unwrap(), INITIAL_SUPPLY);
}

/// Tests burning tokens.
#[test]
fn test_burn() {
    let (mut ledger, deployer, _) = deploy();

    ledger.burn(deployer, 1000).unwrap();

    assert_eq!(ledger.total_supply().unwrap(), 999_999_999_000);
    assert_eq!(ledger.get_balance(&deployer).unwrap(), 999_999_999_000);
    assert_eq!(
        ledger.drain_events(),
        vec![LedgerEvent::Burn(TokenEvent {
            from: deployer,
            to: AccountId::EMPTY,
            amount: 1000,
        })]
    );
}

/// Tests burning more than the balance.
#[test]
fn test_burn_exceeding_balance() {
    let (mut ledger, deployer, _) = deploy();
    assert!(matches!(
        ledger.burn(deployer, 1_000_000_000_001),
        Err(LedgerError::InsufficientBalance { .. })
    ));
}

/// Tests burning the entire supply.
#[test]
fn test_burn_everything() {
    let (mut ledger, deployer, sender) = deploy();
    ledger.burn(deployer, INITIAL_SUPPLY).unwrap();

    assert_eq!(ledger.total_supply().unwrap(), 0);
    assert_eq!(ledger.get_balance(&sender).unwrap(), 0);
    assert!(matches!(
        ledger.transfer(deployer, sender, 1),
        Err(LedgerError::InsufficientBalance { .. })
    ));
    ledger.transfer(deployer, sender, 0).unwrap();
}

/// Tests owner pause and unpause.
#[test]
fn test_owner_pause_and_unpause() {
    let (mut ledger, deployer, sender) = deploy();

    ledger.pause(deployer).unwrap();
    assert!(ledger.is_paused().unwrap());

    // Idempotent in effect
    ledger.pause(deployer).unwrap();
    assert!(ledger.is_paused().unwrap());

    ledger.unpause(deployer).unwrap();
    assert!(!ledger.is_paused().unwrap());
    ledger.unpause(deployer).unwrap();
    assert!(!ledger.is_paused().unwrap());

    ledger.transfer(deployer, sender, 10).unwrap();
    assert!(ledger.drain_events().len() == 1);
}

/// Tests that only the owner controls the pause flag.
#[test]
fn test_non_owner_cannot_pause() {
    let (mut ledger, deployer, sender) = deploy();

    assert_eq!(
        ledger.pause(sender),
        Err(LedgerError::Unauthorized {
            sender,
            owner: deployer,
        })
    );
    assert!(!ledger.is_paused().unwrap());

    ledger.pause(deployer).unwrap();
    assert!(matches!(
        ledger.unpause(sender),
        Err(LedgerError::Unauthorized { .. })
    ));
    assert!(ledger.is_paused().unwrap());
}

/// Tests that the balance query ignores its argument.
#[test]
fn test_get_balance_ignores_address() {
    let (mut ledger, deployer, _) = deploy();
    ledger.burn(deployer, 42).unwrap();

    let expected = ledger.state().unwrap().balance;
    for _ in 0..16 {
        assert_eq!(ledger.get_balance(&random_account()).unwrap(), expected);
    }
    assert_eq!(ledger.get_balance(&AccountId::EMPTY).unwrap(), expected);
}

/// Tests supply and balance invariants over a random sequence of calls.
#[test]
fn test_random_sequence_invariants() {
    let (mut ledger, deployer, sender) = deploy();
    let mut rng = rand::thread_rng();
    let mut last_supply = ledger.total_supply().unwrap();

    for _ in 0..500 {
        let balance = ledger.state().unwrap().balance;
        let amount = if rng.gen_bool(0.8) {
            rng.gen_range(0..=balance.min(1_000_000))
        } else {
            rng.gen_range(0..=u64::MAX)
        };
        let caller = if rng.gen_bool(0.5) { deployer } else { sender };

        let call = match rng.gen_range(0..4) {
            0 => Call::Pause,
            1 => Call::Unpause,
            2 => Call::Transfer { to: sender, amount },
            _ => Call::Burn { amount },
        };

        let before = ledger.state().unwrap().clone();
        match ledger.execute(caller, call.clone()) {
            Ok(()) => {
                let after = ledger.state().unwrap();
                match call {
                    Call::Transfer { .. } => {
                        assert_eq!(after.total_supply, before.total_supply);
                        assert_eq!(after.balance, before.balance);
                    }
                    Call::Burn { amount } => {
                        assert_eq!(after.total_supply, before.total_supply - amount);
                        assert_eq!(after.balance, before.balance - amount);
                    }
                    _ => assert_eq!(caller, deployer),
                }
                assert_eq!(after.version, before.version + 1);
            }
            Err(_) => assert_eq!(ledger.state().unwrap(), &before),
        }

        let supply = ledger.total_supply().unwrap();
        assert!(supply <= last_supply);
        assert_eq!(ledger.state().unwrap().balance, supply);
        last_supply = supply;
    }
}

/// Tests the snapshot recorded by each call.
#[test]
fn test_snapshot_fields_per_call() {
    let (ledger, deployer, sender) = deploy();

    let pause = ledger.prepare(deployer, Call::Pause).unwrap();
    assert_eq!(
        pause.preconditions.expected(Field::Owner),
        Some(FieldValue::Account(deployer))
    );
    assert_eq!(pause.preconditions.len(), 1);

    let transfer = ledger
        .prepare(deployer, Call::Transfer { to: sender, amount: 5 })
        .unwrap();
    let fields: Vec<Field> = transfer.preconditions.iter().map(|p| p.field).collect();
    assert_eq!(fields, vec![Field::IsPaused, Field::Balance]);
}
