use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Move {
    // Normal
    Tackle,
    Scratch,
    Pound,
    QuickAttack,
    Headbutt,
    BodySlam,
    DoubleEdge,
    HyperBeam,
    Return,
    ExtremeSpeed,
    FakeOut,
    SlackOff,
    Growl,
    TailWhip,
    Splash,
    Transform,
    Protect,
    Rest,
    SleepTalk,
    Substitute,
    BatonPass,
    SwordsDance,
    Softboiled,
    Recover,
    // Fire
    Ember,
    FirePunch,
    Flamethrower,
    FireBlast,
    BlazeKick,
    WillOWisp,
    // Water
    WaterGun,
    BubbleBeam,
    Surf,
    HydroPump,
    Waterfall,
    Crabhammer,
    FlipTurn,
    // Grass
    Absorb,
    VineWhip,
    RazorLeaf,
    GigaDrain,
    SolarBeam,
    LeafBlade,
    LeechSeed,
    SleepPowder,
    Spore,
    // Electric
    ThunderShock,
    ThunderPunch,
    Thunderbolt,
    Thunder,
    ThunderWave,
    VoltSwitch,
    // Ice
    PowderSnow,
    IcePunch,
    IceBeam,
    Blizzard,
    // Fighting
    KarateChop,
    LowKick,
    CrossChop,
    BrickBreak,
    SkyUppercut,
    CloseCombat,
    BulkUp,
    // Poison
    PoisonSting,
    Sludge,
    SludgeBomb,
    Toxic,
    ToxicSpikes,
    // Ground
    MudSlap,
    Dig,
    Earthquake,
    Spikes,
    // Flying
    Gust,
    WingAttack,
    Fly,
    DrillPeck,
    AerialAce,
    // Psychic
    Confusion,
    Psybeam,
    Psychic,
    CalmMind,
    Teleport,
    LightScreen,
    Reflect,
    Trick,
    TrickRoom,
    // Bug
    StringShot,
    Harden,
    SignalBeam,
    UTurn,
    Megahorn,
    StickyWeb,
    // Rock
    RockThrow,
    RockSlide,
    AncientPower,
    StealthRock,
    // Ghost
    Lick,
    NightShade,
    ShadowBall,
    // Dragon
    DragonRage,
    DragonClaw,
    Outrage,
    DragonDance,
    // Dark
    Bite,
    Crunch,
    Pursuit,
    Taunt,
    PartingShot,
    // Steel
    MetalClaw,
    IronTail,
    SteelWing,
    MeteorMash,
    IronDefense,
}

impl Move {
    /// Base power, zero for status moves.
    pub fn power(self) -> u8 {
        use Move::*;

        match self {
            Tackle | Scratch | Pound | QuickAttack => 40,
            Headbutt => 70,
            BodySlam => 85,
            DoubleEdge => 120,
            HyperBeam => 150,
            Return => 102,
            ExtremeSpeed => 80,
            FakeOut => 40,
            Ember | WaterGun | ThunderShock | PowderSnow => 40,
            FirePunch | ThunderPunch | IcePunch => 75,
            Flamethrower | Surf | Thunderbolt | IceBeam => 90,
            FireBlast | HydroPump | Thunder | Blizzard => 110,
            BlazeKick => 85,
            BubbleBeam => 65,
            Waterfall => 80,
            Crabhammer => 100,
            FlipTurn | UTurn | VoltSwitch => 70,
            Absorb => 20,
            VineWhip => 45,
            RazorLeaf => 55,
            GigaDrain => 75,
            SolarBeam => 120,
            LeafBlade => 90,
            KarateChop => 50,
            LowKick => 60,
            CrossChop => 100,
            BrickBreak => 75,
            SkyUppercut => 85,
            CloseCombat => 120,
            PoisonSting => 15,
            Sludge => 65,
            SludgeBomb => 90,
            MudSlap => 20,
            Dig => 80,
            Earthquake => 100,
            Gust => 40,
            WingAttack => 60,
            Fly => 90,
            DrillPeck => 80,
            AerialAce => 60,
            Confusion => 50,
            Psybeam => 65,
            Psychic => 90,
            SignalBeam => 75,
            Megahorn => 120,
            RockThrow => 50,
            RockSlide => 75,
            AncientPower => 60,
            Lick => 30,
            ShadowBall => 80,
            DragonClaw => 80,
            Outrage => 120,
            Bite => 60,
            Crunch => 80,
            Pursuit => 40,
            MetalClaw => 50,
            IronTail => 100,
            SteelWing => 70,
            MeteorMash => 90,
            // Fixed-damage moves still deal damage.
            NightShade | DragonRage => 1,
            Growl | TailWhip | Splash | Transform | Protect | Rest | SleepTalk | Substitute
            | BatonPass | SwordsDance | Softboiled | Recover | SlackOff | WillOWisp | LeechSeed
            | SleepPowder | Spore | ThunderWave | BulkUp | Toxic | ToxicSpikes | Spikes
            | CalmMind | Teleport | LightScreen | Reflect | Trick | TrickRoom | StringShot
            | Harden | StickyWeb | StealthRock | DragonDance | Taunt | PartingShot
            | IronDefense => 0,
        }
    }

    pub fn is_damaging(self) -> bool {
        self.power() != 0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
