use alloc::vec;

use super::*;

#[test]
fn test_coconut_negates_one_hit() {
    let report = run_battle(
        vec![holding(pet(PetKind::Fish), Status::Coconut)],
        vec![pet(PetKind::Fish)],
        9,
    );

    assert_eq!(report.outcome, crate::Outcome::Winner(Team::Player));
    assert_eq!(
        report.player.snapshot(),
        vec![line("fish", 2, 2, "none", 1, 0)],
        "Coconut should absorb the hit and be used up"
    );
}

#[test]
fn test_melon_armor_absorbs_twenty() {
    let battle = after_rounds(
        vec![holding(pet_with(PetKind::Fish, 2, 5), Status::MelonArmor)],
        vec![pet_with(PetKind::Fish, 22, 50)],
        1,
    );

    assert_eq!(snapshot(&battle, Team::Player), vec![line("fish", 2, 3, "none", 1, 0)]);
}

#[test]
fn test_garlic_and_weak_adjust_incoming_damage() {
    let garlic = after_rounds(
        vec![holding(pet_with(PetKind::Fish, 2, 5), Status::Garlic)],
        vec![pet_with(PetKind::Fish, 3, 20)],
        1,
    );
    assert_eq!(
        snapshot(&garlic, Team::Player),
        vec![line("fish", 2, 4, "garlic", 1, 0)],
        "Garlic takes 2 off but never below 1, and stays equipped"
    );

    let weak = after_rounds(
        vec![holding(pet_with(PetKind::Fish, 2, 10), Status::Weak)],
        vec![pet_with(PetKind::Fish, 1, 20)],
        1,
    );
    assert_eq!(weak.team(Team::Player).front().map(|u| u.health), Some(6));
}

#[test]
fn test_meat_bone_and_chili_add_attack_damage() {
    let bone = after_rounds(
        vec![holding(pet(PetKind::Fish), Status::MeatBone)],
        vec![pet_with(PetKind::Fish, 1, 10)],
        1,
    );
    assert_eq!(bone.team(Team::Enemy).front().map(|u| u.health), Some(5));

    let chili = after_rounds(
        vec![holding(pet_with(PetKind::Fish, 2, 10), Status::Chili)],
        vec![pet_with(PetKind::Fish, 1, 10), pet_with(PetKind::Fish, 1, 6)],
        1,
    );
    assert_eq!(
        chili
            .team(Team::Enemy)
            .iter()
            .map(|u| u.health)
            .collect::<Vec<_>>(),
        vec![8, 1],
        "Chili splashes 5 onto the second enemy"
    );
}

#[test]
fn test_honey_leaves_a_bee() {
    let battle = after_rounds(
        vec![holding(pet_with(PetKind::Fish, 1, 1), Status::Honey)],
        vec![pet_with(PetKind::Fish, 1, 5)],
        1,
    );

    assert_eq!(snapshot(&battle, Team::Player), vec![line("bee", 1, 1, "none", 1, 0)]);
    assert_eq!(snapshot(&battle, Team::Enemy), vec![line("fish", 1, 4, "none", 1, 0)]);
}

#[test]
fn test_extra_life_resolves_after_own_faint_ability() {
    // SCENARIO:
    // A level 2 cricket holding an extra life dies. Its own ability puts a
    // 2/2 zombie in slot 0 first; the item then revives the cricket as a
    // level 2 1/1 in the same slot, ahead of the zombie.

    let battle = after_rounds(
        vec![holding(
            pet_with(PetKind::Cricket, 1, 1).with_level(2),
            Status::ExtraLife,
        )],
        vec![pet_with(PetKind::Fish, 5, 20)],
        1,
    );

    assert_eq!(
        snapshot(&battle, Team::Player),
        vec![
            line("cricket", 1, 1, "none", 2, 0),
            line("zombie-cricket", 2, 2, "none", 1, 0),
        ]
    );
}
