//! Demo adventure content
//!
//! Hand-authored adventure used when no generation credential is configured
//! or the upstream provider reports an exhausted quota. The content satisfies
//! every structural expectation of the generated documents (id sequencing,
//! encounter-type coverage, fail-forward on every encounter) and never
//! touches the network.

use crate::domain::entities::{
    AdventureOutline, BranchingChoice, DetailedAdventureOutline, Encounter, EncounterTrigger,
    ExpandedSceneGuide, Faction, KeyNpc, LevelProgressionStep, LocationStep, OutlineRequest,
    OutlineResponse, Scene, StoryBeat,
};
use crate::domain::value_objects::{
    EncounterDifficulty, EncounterType, LevelingMode, Ruleset,
};

const DEMO_TITLE: &str = "The Lantern That Remembers";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Levels for the two demo progression steps.
///
/// The first step lands one level above the start (capped at the end level)
/// when the party is meant to advance at all; the second is always the end.
pub fn demo_progression_levels(start_level: u8, end_level: u8) -> (u8, u8) {
    let first = if end_level > start_level {
        start_level.saturating_add(1).min(end_level)
    } else {
        start_level
    };
    (first, end_level)
}

/// Build a complete outline pair without calling the generation endpoint
pub fn demo_outline_response(request: &OutlineRequest) -> OutlineResponse {
    let outline = demo_outline();
    let detailed = demo_detailed_outline(request);
    OutlineResponse { outline, detailed }
}

fn demo_outline() -> AdventureOutline {
    AdventureOutline {
        title: DEMO_TITLE.to_string(),
        logline: "A coastal lighthouse keeps relighting a night that already happened, and the \
                  party must break the loop before the harbor forgets how to wake up."
            .to_string(),
        central_conflict: "The keeper's daughter bargained with a tide spirit to undo the wreck \
                           that drowned her father; the spirit is now collecting the price from \
                           every ship that sees the light."
            .to_string(),
        villain_or_antagonist: "Mother Brine, a patient tide spirit who keeps every bargain to \
                                the letter and believes the harbor owes her a crew."
            .to_string(),
        themes: strings(&["grief", "bargains", "memory", "the sea"]),
        hooks: strings(&[
            "A harbor master pays well for anyone who can explain why the same ship keeps arriving.",
            "One of the party wakes with salt in their lungs and a memory of drowning.",
            "A scholar wants the lighthouse lens recovered before the Lamplighters' Guild seizes it.",
        ]),
        key_npcs: vec![
            KeyNpc {
                name: "Wren Halloway".to_string(),
                role: "The keeper's daughter".to_string(),
                public_face: "A tireless volunteer who rows out to every wreck.".to_string(),
                secret: "She struck the bargain that started the loop.".to_string(),
                leverage: "She will confess if shown her father's last logbook entry.".to_string(),
            },
            KeyNpc {
                name: "Captain Odile Marsh".to_string(),
                role: "Harbor master".to_string(),
                public_face: "Brusque and practical, wants the harbor open.".to_string(),
                secret: "She has noticed the loop and is quietly profiting from salvage.".to_string(),
                leverage: "Her ledgers would ruin her with the guild.".to_string(),
            },
            KeyNpc {
                name: "Brother Tamsin".to_string(),
                role: "Keeper of the seaside shrine".to_string(),
                public_face: "A gentle priest who blesses the nets.".to_string(),
                secret: "He remembers every repetition of the night.".to_string(),
                leverage: "He is desperate for someone to believe him.".to_string(),
            },
        ],
        factions: vec![
            Faction {
                name: "The Lamplighters' Guild".to_string(),
                goal: "Control every lighthouse lens on the coast.".to_string(),
                method: "Contracts, inspections, and quiet sabotage.".to_string(),
                complication: "They want the lens intact, which means keeping the loop alive."
                    .to_string(),
            },
            Faction {
                name: "The Drowned Choir".to_string(),
                goal: "Return to the living world when the loop breaks.".to_string(),
                method: "Whispering through tide pools and fog.".to_string(),
                complication: "Breaking the loop the wrong way leaves them trapped forever."
                    .to_string(),
            },
        ],
        beats: vec![
            StoryBeat {
                beat_id: "B1".to_string(),
                title: "The Ship That Keeps Arriving".to_string(),
                purpose: "Establish the loop and the harbor's unease.".to_string(),
                stakes: "If ignored, another crew is lost tonight.".to_string(),
                twist_or_reveal: "The ship's manifest lists crew who died years ago.".to_string(),
            },
            StoryBeat {
                beat_id: "B2".to_string(),
                title: "Salt Memories".to_string(),
                purpose: "Let the party notice what repeats and what does not.".to_string(),
                stakes: "Each repetition erodes a memory the party holds dear.".to_string(),
                twist_or_reveal: "Brother Tamsin remembers previous loops.".to_string(),
            },
            StoryBeat {
                beat_id: "B3".to_string(),
                title: "The Guild's Interest".to_string(),
                purpose: "Introduce a rival with reasons to keep the loop running.".to_string(),
                stakes: "The guild could seize the lighthouse before the party acts.".to_string(),
                twist_or_reveal: "The harbor master is on the guild's payroll.".to_string(),
            },
            StoryBeat {
                beat_id: "B4".to_string(),
                title: "The Keeper's Logbook".to_string(),
                purpose: "Point the party toward the bargain.".to_string(),
                stakes: "Without the logbook, the bargain cannot be named or undone.".to_string(),
                twist_or_reveal: "The final entry is written in Wren's hand.".to_string(),
            },
            StoryBeat {
                beat_id: "B5".to_string(),
                title: "Confession at Low Tide".to_string(),
                purpose: "Turn a suspect into an ally.".to_string(),
                stakes: "Wren may flee into the loop rather than face the harbor.".to_string(),
                twist_or_reveal: "Mother Brine will accept a different price.".to_string(),
            },
            StoryBeat {
                beat_id: "B6".to_string(),
                title: "The Last Night".to_string(),
                purpose: "Resolve the bargain at the top of the lighthouse.".to_string(),
                stakes: "Fail, and the party joins the loop.".to_string(),
                twist_or_reveal: "The light can be turned to guide the Drowned Choir home.".to_string(),
            },
        ],
        continuity_promises: strings(&[
            "Wren Halloway made the bargain with Mother Brine.",
            "Brother Tamsin remembers every repetition of the night.",
            "The lighthouse lens is the anchor of the loop.",
            "The Lamplighters' Guild wants the lens intact.",
            "Mother Brine keeps every bargain to the letter.",
            "The keeper's logbook holds the exact wording of the bargain.",
        ]),
    }
}

fn demo_detailed_outline(request: &OutlineRequest) -> DetailedAdventureOutline {
    let (first_level, second_level) =
        demo_progression_levels(request.party_level_start, request.party_level_end);

    let (first_rationale, second_rationale) = match request.leveling_mode {
        LevelingMode::Milestone => (
            "Milestone: the party has uncovered who made the bargain.",
            "Milestone: the loop is broken and the harbor wakes.",
        ),
        LevelingMode::Xp => (
            "XP: the encounters of the first three scenes should carry the party to this level.",
            "XP: the finale and its optional objectives complete the advancement.",
        ),
    };

    DetailedAdventureOutline {
        outline_title: DEMO_TITLE.to_string(),
        structure_notes: strings(&[
            "Three acts: investigate the loop, name the bargain, break it.",
            "Scenes S2 and S3 can be run in either order.",
            "Every failure advances the night and tightens the loop rather than ending the story.",
        ]),
        scenes: vec![
            Scene {
                scene_id: "S1".to_string(),
                title: "Arrival at Gullhaven".to_string(),
                location: "Gullhaven harbor".to_string(),
                goal: "Learn that the same ship arrives every night.".to_string(),
                boxed_text: "Fog rolls across the harbor as a battered schooner glides in \
                             without a single lantern lit. The dockhands step back as one."
                    .to_string(),
                obstacles: strings(&["Dockhands refuse to talk", "The fog hides the ship's name"]),
                encounters: vec![Encounter {
                    encounter_id: "E1".to_string(),
                    encounter_type: EncounterType::Social,
                    difficulty: EncounterDifficulty::Easy,
                    summary: "Convince the harbor master to share the arrival records.".to_string(),
                    win_condition: "Captain Marsh hands over the ledger of arrivals.".to_string(),
                    fail_forward: "Marsh refuses, but a clerk slips the party a torn page that \
                                   names the same ship seven nights running."
                        .to_string(),
                    setup: strings(&["Marsh is short on time and long on suspicion."]),
                    scaling_notes: strings(&["Offer advantage for mentioning the guild."]),
                }],
                clues_and_info: strings(&["The ship is the Gray Heron, lost nine years ago."]),
                rewards: strings(&["A harbor pass"]),
                consequences: strings(&["Marsh starts watching the party."]),
                links_to_beats: strings(&["B1"]),
                estimated_minutes: 40,
            },
            Scene {
                scene_id: "S2".to_string(),
                title: "The Shrine of Nets".to_string(),
                location: "Seaside shrine".to_string(),
                goal: "Meet the one person who remembers the loop.".to_string(),
                boxed_text: "Nets hang from every rafter, each knotted with a name. Brother \
                             Tamsin looks up as if he has been expecting you for years."
                    .to_string(),
                obstacles: strings(&["Tamsin speaks in half-remembered fragments"]),
                encounters: vec![
                    Encounter {
                        encounter_id: "E2".to_string(),
                        encounter_type: EncounterType::Puzzle,
                        difficulty: EncounterDifficulty::Medium,
                        summary: "Order the knotted names to match the wreck's crew list."
                            .to_string(),
                        win_condition: "The nets reveal a missing name: the keeper's own."
                            .to_string(),
                        fail_forward: "Tamsin finishes the pattern himself, but the effort \
                                       costs him his memory of the previous loop."
                            .to_string(),
                        setup: strings(&["Twelve nets, eleven names from the manifest."]),
                        scaling_notes: strings(&["Remove decoy nets for a gentler puzzle."]),
                    },
                    Encounter {
                        encounter_id: "E3".to_string(),
                        encounter_type: EncounterType::Combat,
                        difficulty: EncounterDifficulty::Medium,
                        summary: "Drowned sailors climb out of the tide pools to silence Tamsin."
                            .to_string(),
                        win_condition: "The sailors are driven back into the sea.".to_string(),
                        fail_forward: "The sailors drag Tamsin toward the water; the party \
                                       wakes on the beach at dusk with the loop restarted and \
                                       Tamsin's warning scratched into their skin."
                            .to_string(),
                        setup: strings(&["Four drowned sailors, plus one per extra party member."]),
                        scaling_notes: strings(&["Drop to two sailors for a small party."]),
                    },
                ],
                clues_and_info: strings(&["The loop began the night the keeper drowned."]),
                rewards: strings(&["A blessed net charm that wards off one drowning"]),
                consequences: strings(&["The Drowned Choir notices the party."]),
                links_to_beats: strings(&["B2"]),
                estimated_minutes: 50,
            },
            Scene {
                scene_id: "S3".to_string(),
                title: "Guild Inspection".to_string(),
                location: "The lighthouse gate".to_string(),
                goal: "Get past the guild inspectors into the lighthouse.".to_string(),
                boxed_text: "Two inspectors in brass-buttoned coats guard the gate, clipboards \
                             held like shields."
                    .to_string(),
                obstacles: strings(&["The gate is sealed with a guild lock"]),
                encounters: vec![Encounter {
                    encounter_id: "E4".to_string(),
                    encounter_type: EncounterType::SkillChallenge,
                    difficulty: EncounterDifficulty::Medium,
                    summary: "Bluff, forge, or sneak past the inspection.".to_string(),
                    win_condition: "Three successes before three failures gets the party inside."
                        .to_string(),
                    fail_forward: "The inspectors escort the party inside themselves, keeping \
                                   watch and reporting every discovery to the guild."
                        .to_string(),
                    setup: strings(&["Allow any approach the players describe."]),
                    scaling_notes: strings(&["Require four successes for a larger group."]),
                }],
                clues_and_info: strings(&["Marsh's seal appears on the guild's orders."]),
                rewards: strings(&["Guild inspection papers"]),
                consequences: strings(&["The guild knows the party's names."]),
                links_to_beats: strings(&["B3"]),
                estimated_minutes: 45,
            },
            Scene {
                scene_id: "S4".to_string(),
                title: "The Keeper's Quarters".to_string(),
                location: "Lighthouse, lower floors".to_string(),
                goal: "Find the keeper's logbook.".to_string(),
                boxed_text: "Every clock in the room shows the same minute. Seawater drips \
                             upward from the floorboards."
                    .to_string(),
                obstacles: strings(&["The rooms rearrange with each toll of the bell"]),
                encounters: vec![Encounter {
                    encounter_id: "E5".to_string(),
                    encounter_type: EncounterType::Exploration,
                    difficulty: EncounterDifficulty::Hard,
                    summary: "Navigate the shifting rooms before the bell tolls again.".to_string(),
                    win_condition: "The party reaches the study and takes the logbook.".to_string(),
                    fail_forward: "The bell tolls and the rooms settle, leaving the logbook in \
                                   plain view but the party soaked and exhausted."
                        .to_string(),
                    setup: strings(&["Track three tolls of the bell as a clock."]),
                    scaling_notes: strings(&["Add a fourth toll for an easier run."]),
                }],
                clues_and_info: strings(&["The final logbook entry is in Wren's handwriting."]),
                rewards: strings(&["The keeper's logbook"]),
                consequences: strings(&["Wren learns the logbook is gone."]),
                links_to_beats: strings(&["B4"]),
                estimated_minutes: 50,
            },
            Scene {
                scene_id: "S5".to_string(),
                title: "Low Tide Confession".to_string(),
                location: "The exposed reef".to_string(),
                goal: "Persuade Wren to admit the bargain and help undo it.".to_string(),
                boxed_text: "The sea has pulled back farther than it should. Wren stands \
                             among the wreckage, oar in hand, waiting."
                    .to_string(),
                obstacles: strings(&["The tide returns within the hour"]),
                encounters: vec![Encounter {
                    encounter_id: "E6".to_string(),
                    encounter_type: EncounterType::Social,
                    difficulty: EncounterDifficulty::Hard,
                    summary: "Talk Wren down using the logbook and Tamsin's memories.".to_string(),
                    win_condition: "Wren agrees to offer a new price to Mother Brine.".to_string(),
                    fail_forward: "Wren flees toward the lighthouse, and the party must follow \
                                   her straight into the finale."
                        .to_string(),
                    setup: strings(&["Wren responds to honesty, not threats."]),
                    scaling_notes: strings(&["Each piece of evidence grants a bonus."]),
                }],
                clues_and_info: strings(&["Mother Brine will accept a different price."]),
                rewards: strings(&["Wren as an ally"]),
                consequences: strings(&["Mother Brine rises early."]),
                links_to_beats: strings(&["B5"]),
                estimated_minutes: 40,
            },
            Scene {
                scene_id: "S6".to_string(),
                title: "The Last Night".to_string(),
                location: "Lighthouse lantern room".to_string(),
                goal: "Break the loop and guide the Drowned Choir home.".to_string(),
                boxed_text: "The great lens blazes. Beyond the glass, Mother Brine's shape \
                             rises from the waves, larger than the lighthouse itself."
                    .to_string(),
                obstacles: strings(&["The lens burns anyone who touches it", "The stairs flood"]),
                encounters: vec![
                    Encounter {
                        encounter_id: "E7".to_string(),
                        encounter_type: EncounterType::Combat,
                        difficulty: EncounterDifficulty::Deadly,
                        summary: "Hold off Mother Brine's tide-born servants while the lens turns."
                            .to_string(),
                        win_condition: "The lens completes a full turn toward the open sea."
                            .to_string(),
                        fail_forward: "The lens cracks but still turns; the loop breaks at the \
                                       cost of the lighthouse, which collapses into the sea."
                            .to_string(),
                        setup: strings(&["Servants arrive in waves each round."]),
                        scaling_notes: strings(&["Reduce waves for a smaller party."]),
                    },
                    Encounter {
                        encounter_id: "E8".to_string(),
                        encounter_type: EncounterType::Social,
                        difficulty: EncounterDifficulty::Hard,
                        summary: "Negotiate the new price with Mother Brine.".to_string(),
                        win_condition: "Mother Brine accepts the lens light as payment.".to_string(),
                        fail_forward: "Mother Brine takes a memory from each character instead \
                                       and releases the harbor."
                            .to_string(),
                        setup: strings(&["She answers only to the exact wording of the bargain."]),
                        scaling_notes: Vec::new(),
                    },
                ],
                clues_and_info: strings(&["The Drowned Choir sings when the light faces the sea."]),
                rewards: strings(&["The harbor's gratitude", "A shard of the lens"]),
                consequences: strings(&["The guild loses its claim on the lighthouse."]),
                links_to_beats: strings(&["B6"]),
                estimated_minutes: 60,
            },
        ],
        level_progression: vec![
            LevelProgressionStep {
                step_id: "L1".to_string(),
                after_scene_id: "S3".to_string(),
                level: first_level,
                rationale: first_rationale.to_string(),
                optional_side_objectives: strings(&["Recover the torn arrival records."]),
            },
            LevelProgressionStep {
                step_id: "L2".to_string(),
                after_scene_id: "S6".to_string(),
                level: second_level,
                rationale: second_rationale.to_string(),
                optional_side_objectives: Vec::new(),
            },
        ],
        optional_side_quests: strings(&[
            "Expose Captain Marsh's salvage scheme.",
            "Return the knotted nets to the families of the Gray Heron's crew.",
        ]),
        recap_questions: strings(&[
            "Who remembers the previous nights, and why?",
            "What price did Wren agree to pay?",
            "What does the guild stand to lose if the loop breaks?",
        ]),
    }
}

/// Build a walkthrough for one scene without calling the generation endpoint
pub fn demo_scene_guide(
    request: &OutlineRequest,
    outline: &AdventureOutline,
    detailed: &DetailedAdventureOutline,
    scene: &Scene,
) -> ExpandedSceneGuide {
    let check = |skill: &str, dc: u8, qualitative: &str| -> String {
        match request.ruleset {
            Ruleset::FifthEdition => format!("DC {} {} check", dc, skill),
            Ruleset::SystemAgnostic => format!("{} {} check", qualitative, skill),
        }
    };

    let step_id = |n: usize| format!("{}-L{}", scene.scene_id, n);
    let anchor_promise = outline
        .continuity_promises
        .first()
        .cloned()
        .unwrap_or_else(|| outline.central_conflict.clone());

    let location_steps = vec![
        LocationStep {
            step_id: step_id(1),
            name: format!("Approach to {}", scene.location),
            read_aloud: scene.boxed_text.clone(),
            dm_background: format!(
                "This scene serves the goal: {}. Keep in mind: {}",
                scene.goal, anchor_promise
            ),
            sensory_details: strings(&["Damp air", "Distant gulls", "The smell of tar"]),
            interactive_elements: strings(&["A weathered notice board"]),
            hidden_information: scene.clues_and_info.iter().take(1).cloned().collect(),
            checks: vec![check("Perception", 12, "Easy")],
            choices: vec![
                BranchingChoice {
                    option: "Enter openly".to_string(),
                    consequence: "Locals take note of the party.".to_string(),
                },
                BranchingChoice {
                    option: "Circle around quietly".to_string(),
                    consequence: "The party arrives unseen but later.".to_string(),
                },
            ],
            fail_forward: "The party misses the details but is drawn onward by a commotion ahead."
                .to_string(),
            time_pressure: None,
        },
        LocationStep {
            step_id: step_id(2),
            name: "First contact".to_string(),
            read_aloud: "Someone, or something, has noticed you.".to_string(),
            dm_background: "Introduce the scene's main obstacle here.".to_string(),
            sensory_details: strings(&["Footsteps on wet stone"]),
            interactive_elements: scene.obstacles.clone(),
            hidden_information: Vec::new(),
            checks: vec![check("Insight", 13, "Moderate")],
            choices: vec![BranchingChoice {
                option: "Engage directly".to_string(),
                consequence: "The first encounter begins.".to_string(),
            }],
            fail_forward: "The obstacle reveals itself on its own terms, costing the party the \
                           initiative but not the scene."
                .to_string(),
            time_pressure: None,
        },
        LocationStep {
            step_id: step_id(3),
            name: "The heart of the matter".to_string(),
            read_aloud: format!("At last, the truth of {} comes into view.", scene.title),
            dm_background: "Reveal the scene's key clue here if it has not surfaced yet."
                .to_string(),
            sensory_details: strings(&["A sudden hush"]),
            interactive_elements: strings(&["Something that can be taken or examined"]),
            hidden_information: scene.clues_and_info.clone(),
            checks: vec![check("Investigation", 14, "Moderate")],
            choices: vec![BranchingChoice {
                option: "Take the evidence".to_string(),
                consequence: "Someone will come looking for it.".to_string(),
            }],
            fail_forward: "An NPC points out the clue, but asks a favor in return.".to_string(),
            time_pressure: Some("The tide turns soon.".to_string()),
        },
        LocationStep {
            step_id: step_id(4),
            name: "Complication".to_string(),
            read_aloud: "The situation shifts without warning.".to_string(),
            dm_background: format!(
                "Escalate using the scene's consequences: {}",
                scene.consequences.join("; ")
            ),
            sensory_details: strings(&["A bell tolls"]),
            interactive_elements: Vec::new(),
            hidden_information: Vec::new(),
            checks: vec![check("Athletics", 15, "Hard")],
            choices: vec![
                BranchingChoice {
                    option: "Stand and hold".to_string(),
                    consequence: "The party keeps the ground but takes a toll.".to_string(),
                },
                BranchingChoice {
                    option: "Retreat and regroup".to_string(),
                    consequence: "The party loses ground but keeps its strength.".to_string(),
                },
            ],
            fail_forward: "The complication resolves against the party, opening the way to the \
                           scene's exit under worse conditions."
                .to_string(),
            time_pressure: Some("Three rounds before the way out closes.".to_string()),
        },
        LocationStep {
            step_id: step_id(5),
            name: "Way onward".to_string(),
            read_aloud: "The path ahead is clear, for now.".to_string(),
            dm_background: format!("Award: {}", scene.rewards.join(", ")),
            sensory_details: strings(&["Fresh wind"]),
            interactive_elements: Vec::new(),
            hidden_information: Vec::new(),
            checks: Vec::new(),
            choices: vec![BranchingChoice {
                option: "Press on".to_string(),
                consequence: "Move to the next scene.".to_string(),
            }],
            fail_forward: "Even exhausted, the party is carried forward by events.".to_string(),
            time_pressure: None,
        },
    ];

    // encounters are spread over steps 2 through 5
    let encounter_triggers = scene
        .encounters
        .iter()
        .enumerate()
        .map(|(idx, encounter)| EncounterTrigger {
            encounter_id: encounter.encounter_id.clone(),
            step_id: step_id(idx % 4 + 2),
            trigger: encounter.summary.clone(),
        })
        .collect();

    let exit_transitions = match detailed
        .scenes
        .iter()
        .position(|s| s.scene_id == scene.scene_id)
        .and_then(|idx| detailed.scenes.get(idx + 1))
    {
        Some(next) => vec![format!("Leads to {}: {}", next.scene_id, next.title)],
        None => vec!["Concludes the adventure.".to_string()],
    };

    ExpandedSceneGuide {
        scene_id: scene.scene_id.clone(),
        scene_title: scene.title.clone(),
        overview: format!("{} ({}): {}", scene.title, outline.title, scene.goal),
        location_steps,
        encounter_triggers,
        exit_transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::outline_lint::{lint_adventure, lint_scene_guide};

    fn lighthouse_request() -> OutlineRequest {
        OutlineRequest::new("A cursed lighthouse traps sailors in a time loop")
            .with_levels(1, 3)
            .with_ruleset(Ruleset::FifthEdition)
            .with_sessions(2)
    }

    #[test]
    fn test_progression_levels() {
        assert_eq!(demo_progression_levels(3, 5), (4, 5));
        assert_eq!(demo_progression_levels(5, 5), (5, 5));
        assert_eq!(demo_progression_levels(3, 3), (3, 3));
        assert_eq!(demo_progression_levels(1, 3), (2, 3));
        assert_eq!(demo_progression_levels(19, 20), (20, 20));
    }

    #[test]
    fn test_lighthouse_scenario() {
        let response = demo_outline_response(&lighthouse_request());

        let beats = &response.outline.beats;
        assert!((5..=9).contains(&beats.len()));
        for (idx, beat) in beats.iter().enumerate() {
            assert_eq!(beat.beat_id, format!("B{}", idx + 1));
        }

        let scenes = &response.detailed.scenes;
        assert!((5..=9).contains(&scenes.len()));
        for (idx, scene) in scenes.iter().enumerate() {
            assert_eq!(scene.scene_id, format!("S{}", idx + 1));
        }

        let encounters: Vec<_> = response.detailed.encounters().collect();
        assert!(encounters.iter().any(|e| e.encounter_type.is_combat()));
        assert!(encounters.iter().any(|e| !e.encounter_type.is_combat()));

        let levels: Vec<u8> = response
            .detailed
            .level_progression
            .iter()
            .map(|step| step.level)
            .collect();
        assert_eq!(levels, vec![2, 3]);
    }

    #[test]
    fn test_demo_content_passes_lint() {
        let request = lighthouse_request();
        let response = demo_outline_response(&request);
        let warnings = lint_adventure(&request, &response.outline, &response.detailed);
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn test_encounter_ids_sequential_and_fail_forward() {
        let response = demo_outline_response(&lighthouse_request());
        for (idx, encounter) in response.detailed.encounters().enumerate() {
            assert_eq!(encounter.encounter_id, format!("E{}", idx + 1));
            assert!(!encounter.win_condition.trim().is_empty());
            assert!(!encounter.fail_forward.trim().is_empty());
        }
    }

    #[test]
    fn test_demo_is_deterministic() {
        let request = lighthouse_request();
        assert_eq!(demo_outline_response(&request), demo_outline_response(&request));
    }

    #[test]
    fn test_scene_guide_for_every_scene() {
        let request = lighthouse_request();
        let response = demo_outline_response(&request);

        for scene in &response.detailed.scenes {
            let guide = demo_scene_guide(&request, &response.outline, &response.detailed, scene);
            assert_eq!(guide.scene_id, scene.scene_id);
            assert_eq!(guide.location_steps.len(), 5);
            assert_eq!(guide.encounter_triggers.len(), scene.encounters.len());
            assert!(guide.location_steps[0]
                .step_id
                .starts_with(&format!("{}-L", scene.scene_id)));
            let warnings = lint_scene_guide(scene, &guide);
            assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
        }
    }

    #[test]
    fn test_scene_guide_checks_follow_ruleset() {
        let response = demo_outline_response(&lighthouse_request());
        let scene = &response.detailed.scenes[0];

        let dnd = demo_scene_guide(
            &lighthouse_request(),
            &response.outline,
            &response.detailed,
            scene,
        );
        assert!(dnd.location_steps[0].checks[0].starts_with("DC 12"));

        let agnostic_request = lighthouse_request().with_ruleset(Ruleset::SystemAgnostic);
        let agnostic =
            demo_scene_guide(&agnostic_request, &response.outline, &response.detailed, scene);
        assert!(agnostic.location_steps[0].checks[0].starts_with("Easy"));
        assert!(!agnostic
            .location_steps
            .iter()
            .flat_map(|s| s.checks.iter())
            .any(|c| c.contains("DC")));
    }

    #[test]
    fn test_last_scene_concludes() {
        let request = lighthouse_request();
        let response = demo_outline_response(&request);
        let last = response.detailed.scenes.last().unwrap();
        let guide = demo_scene_guide(&request, &response.outline, &response.detailed, last);
        assert_eq!(guide.exit_transitions, vec!["Concludes the adventure."]);
    }
}
