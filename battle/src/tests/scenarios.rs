use alloc::vec;

use super::*;
use crate::types::UnitId;

#[test]
fn test_cricket_respawns_after_dolphin_start() {
    // SCENARIO:
    // Player: a lone cricket (1/2). Enemy: a dolphin.
    // The dolphin's start-of-battle hit kills the cricket, whose faint
    // ability spawns a 1/1 zombie cricket in the freed slot.

    let battle = start_only(vec![pet(PetKind::Cricket)], vec![pet(PetKind::Dolphin)]);

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![line("zombie-cricket", 1, 1, "none", 1, 0)],
        "Zombie cricket should occupy the only player slot"
    );
    assert_eq!(
        snapshot(&battle, Team::Enemy),
        vec![line("dolphin", 4, 6, "none", 1, 1)]
    );

    let labels: Vec<&str> = battle.history().labels().collect();
    assert_eq!(labels, vec!["init", "start"]);
}

#[test]
fn test_mosquito_finds_no_target_after_dolphin() {
    // SCENARIO:
    // Same as above, with a mosquito behind the dolphin. The dolphin kills the
    // cricket first; when the mosquito resolves later in the same wave there
    // is no living enemy, so it does nothing. The zombie only arrives in the
    // next wave, after the mosquito had its turn.

    let with_mosquito = start_only(
        vec![pet(PetKind::Cricket)],
        vec![pet(PetKind::Dolphin), pet(PetKind::Mosquito)],
    );
    let without = start_only(vec![pet(PetKind::Cricket)], vec![pet(PetKind::Dolphin)]);

    assert_eq!(
        snapshot(&with_mosquito, Team::Player),
        snapshot(&without, Team::Player),
        "Mosquito must not affect the player roster"
    );
    assert_eq!(
        snapshot(&with_mosquito, Team::Enemy),
        vec![
            line("dolphin", 4, 6, "none", 1, 1),
            line("mosquito", 2, 2, "none", 1, 0),
        ]
    );
}

#[test]
fn test_tortoise_endures_once_per_fatal_hit() {
    // SCENARIO:
    // A tortoise (2/4) takes a fatal 5 damage hit at start of battle.
    // The pre-damage hook must run before health drops: one use spent,
    // the tortoise stays at exactly 1 health and never faints.

    let battle = start_only(vec![pet(PetKind::Tortoise)], vec![pet(PetKind::Dolphin)]);

    let tortoise = battle.team(Team::Player).front().expect("tortoise survives");
    assert_eq!(tortoise.health, 1);
    assert_eq!(tortoise.ability_counter, 1, "exactly one use spent");
    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![line("tortoise", 2, 1, "none", 1, 1)]
    );
}

#[test]
fn test_tortoise_falls_once_uses_are_spent() {
    // SCENARIO:
    // Three dolphins hit the tortoise in one wave. The first two fatal hits
    // are endured (2 uses), the third kills it.

    let battle = start_only(
        vec![pet(PetKind::Tortoise)],
        vec![
            pet(PetKind::Dolphin),
            pet(PetKind::Dolphin),
            pet(PetKind::Dolphin),
        ],
    );

    assert!(
        battle.team(Team::Player).is_empty(),
        "Tortoise should faint on the third fatal hit"
    );
}

#[test]
fn test_hive_deploys_only_on_second_trigger() {
    // SCENARIO:
    // One dolphin kills one fish: each hive sees a single friend faint,
    // which only charges the counter.

    let once = start_only(
        vec![
            pet_with(PetKind::Fish, 1, 1),
            pet(PetKind::Hive),
            pet(PetKind::Hive),
        ],
        vec![pet(PetKind::Dolphin)],
    );
    assert_eq!(
        snapshot(&once, Team::Player),
        vec![
            line("hive", 1, 4, "none", 1, 1),
            line("hive", 1, 4, "none", 1, 1),
        ],
        "No bees after the first trigger"
    );

    // SCENARIO:
    // Two dolphins kill two fish: each hive fires exactly once, on its
    // second trigger, deploying one bee directly behind itself.

    let twice = start_only(
        vec![
            pet_with(PetKind::Fish, 1, 1),
            pet_with(PetKind::Fish, 1, 1),
            pet(PetKind::Hive),
            pet(PetKind::Hive),
        ],
        vec![pet(PetKind::Dolphin), pet(PetKind::Dolphin)],
    );
    assert_eq!(
        snapshot(&twice, Team::Player),
        vec![
            line("hive", 1, 4, "none", 1, 0),
            line("bee", 1, 1, "none", 1, 0),
            line("hive", 1, 4, "none", 1, 0),
            line("bee", 1, 1, "none", 1, 0),
        ]
    );
}

#[test]
fn test_superior_roster_wins() {
    // SCENARIO:
    // A 10/10 fish against a 2/2 fish. One clash decides it and the last
    // snapshot of the last phase shows the enemy side empty.

    let report = run_battle(
        vec![pet_with(PetKind::Fish, 10, 10)],
        vec![pet(PetKind::Fish)],
        1,
    );

    assert_eq!(report.outcome, crate::Outcome::Winner(Team::Player));
    assert_eq!(report.rounds, 1);

    let last = report.history.last().expect("history recorded");
    assert_eq!(last.phase, "attack 0");
    let final_state = last.last().expect("attack phase has snapshots");
    assert!(final_state.1.is_empty(), "Loser side should be empty");
    assert_eq!(final_state.0, vec![line("fish", 10, 8, "none", 1, 0)]);
}

#[test]
fn test_ids_are_assigned_player_first_and_continue_for_spawns() {
    let battle = start_only(vec![pet(PetKind::Cricket)], vec![pet(PetKind::Dolphin)]);

    assert_eq!(battle.team(Team::Enemy).front().map(|u| u.id), Some(UnitId(2)));
    assert_eq!(
        battle.team(Team::Player).front().map(|u| u.id),
        Some(UnitId(3)),
        "Spawned units continue the id counter"
    );
}

// ==========================================
// FAINT CASCADES
// ==========================================

/// Level 3 badger on 1 health holding honey: the dolphin always picks it,
/// and its faint deals 5 * 3 / 2 = 7 to both neighbours.
fn honey_badger() -> Unit {
    holding(pet_with(PetKind::Badger, 5, 1).with_level(3), Status::Honey)
}

fn extra_life_fish() -> Unit {
    holding(pet(PetKind::Fish), Status::ExtraLife)
}

#[test]
fn test_camel_takes_second_dolphin_and_mosquito_finishes_it() {
    // SCENARIO:
    // Player: [Cricket, Camel 2/6]. Enemy: [Dolphin, Dolphin, Mosquito L3].
    // Dolphin one kills the cricket, dolphin two leaves the camel on 1, and
    // the mosquito's only possible target is the camel. The zombie cricket
    // is all that remains.

    let battle = start_only(
        vec![pet(PetKind::Cricket), pet(PetKind::Camel)],
        vec![
            pet(PetKind::Dolphin),
            pet(PetKind::Dolphin),
            pet(PetKind::Mosquito).with_level(3),
        ],
    );

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![line("zombie-cricket", 1, 1, "none", 1, 0)]
    );
}

#[test]
fn test_honey_ant_leaves_a_bee_at_start() {
    let battle = start_only(
        vec![holding(pet(PetKind::Ant), Status::Honey)],
        vec![pet(PetKind::Dolphin)],
    );

    assert_eq!(snapshot(&battle, Team::Player), vec![line("bee", 1, 1, "none", 1, 0)]);
}

#[test]
fn test_items_respawn_in_their_own_slots() {
    // SCENARIO:
    // Player: [Badger (honey), Fish (extra life), Fish]. Enemy: [Dolphin].
    // The dolphin kills the badger, whose faint kills the dolphin and the
    // fish behind it. The bee goes where the badger stood and the revived
    // fish where it stood, ahead of the untouched fish.

    let battle = start_only(
        vec![honey_badger(), extra_life_fish(), pet(PetKind::Fish)],
        vec![pet(PetKind::Dolphin)],
    );

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![
            line("bee", 1, 1, "none", 1, 0),
            line("fish", 1, 1, "none", 1, 0),
            line("fish", 2, 2, "none", 1, 0),
        ]
    );
    assert!(battle.team(Team::Enemy).is_empty());
}

#[test]
fn test_fly_zombies_and_items_interleave_by_grave() {
    // SCENARIO:
    // Player: [Badger (honey), Fish (extra life), Fly]. Enemy: [Dolphin].
    // Each fainted friend gets a zombie fly in front of its grave, and each
    // item spawns after the chain settles, directly behind that zombie.

    let battle = start_only(
        vec![honey_badger(), extra_life_fish(), pet(PetKind::Fly)],
        vec![pet(PetKind::Dolphin)],
    );

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![
            line("zombie-fly", 4, 4, "none", 1, 0),
            line("bee", 1, 1, "none", 1, 0),
            line("zombie-fly", 4, 4, "none", 1, 0),
            line("fish", 1, 1, "none", 1, 0),
            line("fly", 5, 5, "none", 1, 2),
        ]
    );
}

#[test]
fn test_pending_items_hold_their_slots_against_fly() {
    // SCENARIO:
    // As above with a second fish. After the first zombie fly, three living
    // units plus two pending items fill the roster, so the fly's second
    // trigger spawns nothing and keeps its charge.

    let battle = start_only(
        vec![
            honey_badger(),
            extra_life_fish(),
            pet(PetKind::Fish),
            pet(PetKind::Fly),
        ],
        vec![pet(PetKind::Dolphin)],
    );

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![
            line("zombie-fly", 4, 4, "none", 1, 0),
            line("bee", 1, 1, "none", 1, 0),
            line("fish", 1, 1, "none", 1, 0),
            line("fish", 2, 2, "none", 1, 0),
            line("fly", 5, 5, "none", 1, 1),
        ]
    );
}

#[test]
fn test_shark_grows_once_per_friend_faint() {
    let battle = start_only(
        vec![
            honey_badger(),
            extra_life_fish(),
            pet(PetKind::Fly),
            pet(PetKind::Shark),
        ],
        vec![pet(PetKind::Dolphin)],
    );

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![
            line("zombie-fly", 4, 4, "none", 1, 0),
            line("bee", 1, 1, "none", 1, 0),
            line("fish", 1, 1, "none", 1, 0),
            line("fly", 5, 5, "none", 1, 1),
            line("shark", 8, 8, "none", 1, 2),
        ]
    );
}

#[test]
fn test_honey_waits_for_the_hedgehog() {
    // SCENARIO:
    // Player: [Badger (honey), Hedgehog]. Enemy: [Dolphin].
    // The badger's faint kills the dolphin and the hedgehog. The hedgehog's
    // faint damage goes off before the honey resolves, so the bee survives.

    let battle = start_only(
        vec![honey_badger(), pet(PetKind::Hedgehog)],
        vec![pet(PetKind::Dolphin)],
    );

    assert_eq!(snapshot(&battle, Team::Player), vec![line("bee", 1, 1, "none", 1, 0)]);
    assert!(battle.team(Team::Enemy).is_empty());
}

#[test]
fn test_sheep_rams_sit_behind_zombie_and_bee() {
    // SCENARIO:
    // Player: [Sheep 2/1 (honey), Fly]. Enemy: [Dolphin].
    // The rams go behind the sheep's grave; the zombie fly and then the
    // bee go in front of it.

    let battle = start_only(
        vec![holding(pet_with(PetKind::Sheep, 2, 1), Status::Honey), pet(PetKind::Fly)],
        vec![pet(PetKind::Dolphin)],
    );

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![
            line("zombie-fly", 4, 4, "none", 1, 0),
            line("bee", 1, 1, "none", 1, 0),
            line("ram", 2, 2, "none", 1, 0),
            line("ram", 2, 2, "none", 1, 0),
            line("fly", 5, 5, "none", 1, 1),
        ]
    );
}

#[test]
fn test_ox_arms_up_and_fly_finds_no_room() {
    // SCENARIO:
    // Player: [Sheep 2/1 (honey), Ox, Fly]. Enemy: [Dolphin].
    // Two rams, the ox and the fly plus the reserved bee slot fill the
    // roster, so the fly cannot spawn.

    let battle = start_only(
        vec![
            holding(pet_with(PetKind::Sheep, 2, 1), Status::Honey),
            pet(PetKind::Ox),
            pet(PetKind::Fly),
        ],
        vec![pet(PetKind::Dolphin)],
    );

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![
            line("bee", 1, 1, "none", 1, 0),
            line("ram", 2, 2, "none", 1, 0),
            line("ram", 2, 2, "none", 1, 0),
            line("ox", 2, 3, "melon-armor", 1, 1),
            line("fly", 5, 5, "none", 1, 0),
        ]
    );
}

#[test]
fn test_spider_summon_lands_behind_its_revived_self() {
    let battle = start_only(
        vec![
            holding(pet_with(PetKind::Spider, 2, 1).with_level(3), Status::ExtraLife),
            pet(PetKind::Fly),
        ],
        vec![pet(PetKind::Dolphin)],
    );

    let player: Vec<&Unit> = battle.team(Team::Player).iter().collect();
    assert_eq!(player.len(), 4);
    assert_eq!(player[0].kind, PetKind::ZombieFly);
    assert_eq!(
        (player[1].kind, player[1].attack, player[1].health, player[1].level()),
        (PetKind::Spider, 1, 1, 3)
    );
    assert!(crate::pets::TIER_THREE_POOL.contains(&player[2].kind));
    assert_eq!((player[2].attack, player[2].health, player[2].level()), (2, 2, 3));
    assert_eq!((player[3].kind, player[3].ability_counter), (PetKind::Fly, 1));
}

#[test]
fn test_kangaroo_rosters_are_quiet_at_start() {
    for enemy in [PetKind::Blowfish, PetKind::Badger] {
        let battle = start_only(
            vec![pet(PetKind::Sheep), pet(PetKind::Kangaroo)],
            vec![pet(enemy)],
        );

        assert_eq!(
            snapshot(&battle, Team::Player),
            vec![
                line("sheep", 2, 2, "none", 1, 0),
                line("kangaroo", 1, 2, "none", 1, 0),
            ]
        );
        let start = battle.history().get("start").expect("start phase logged");
        assert_eq!(start.snapshots.len(), 1, "No wave had anything to resolve");
    }
}
