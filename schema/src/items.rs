use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    // Capture devices
    PokeBall,
    GreatBall,
    UltraBall,
    MasterBall,
    NetBall,
    DiveBall,
    NestBall,
    RepeatBall,
    TimerBall,
    LuxuryBall,
    PremierBall,
    DuskBall,
    QuickBall,
    HeavyBall,
    LoveBall,
    FriendBall,
    MoonBall,
    DreamBall,

    // Evolution items
    FireStone,
    WaterStone,
    ThunderStone,
    LeafStone,
    MoonStone,
    SunStone,
    MetalCoat,
    DragonScale,

    // Held items
    Leftovers,
    ShellBell,
    ChoiceBand,
    ChoiceSpecs,
    ChoiceScarf,
    MuscleBand,
    WiseGlasses,
    QuickClaw,
    LumBerry,
    SitrusBerry,
    LifeOrb,
    FocusSash,
    BrightPowder,
    KingsRock,
    ScopeLens,
    Charcoal,
    MysticWater,
    BlackBelt,

    // Primal orbs
    RedOrb,
    BlueOrb,

    // Mega stones
    Venusaurite,
    CharizarditeX,
    CharizarditeY,
    Blastoisinite,
    Alakazite,
    Gengarite,
    Gyaradosite,
    Aerodactylite,
    Scizorite,
    Heracronite,
    Houndoominite,
    Tyranitarite,
    Blazikenite,
    Swampertite,
    Sceptilite,
    Gardevoirite,
    Aggronite,
    Manectite,
    Absolite,
    Salamencite,
    Metagrossite,
    Latiasite,
    Latiosite,

    // Z-crystals
    NormaliumZ,
    FiriumZ,
    WateriumZ,
    ElectriumZ,
    GrassiumZ,
    IciumZ,
    FightiniumZ,
    PoisoniumZ,
    GroundiumZ,
    FlyiniumZ,
    PsychiumZ,
    BuginiumZ,
    RockiumZ,
    GhostiumZ,
    DragoniumZ,
    DarkiniumZ,
    SteeliumZ,
}

impl Item {
    pub fn is_capture_device(self) -> bool {
        use Item::*;
        matches!(
            self,
            PokeBall
                | GreatBall
                | UltraBall
                | MasterBall
                | NetBall
                | DiveBall
                | NestBall
                | RepeatBall
                | TimerBall
                | LuxuryBall
                | PremierBall
                | DuskBall
                | QuickBall
                | HeavyBall
                | LoveBall
                | FriendBall
                | MoonBall
                | DreamBall
        )
    }

    pub fn is_mega_stone(self) -> bool {
        use Item::*;
        matches!(
            self,
            Venusaurite
                | CharizarditeX
                | CharizarditeY
                | Blastoisinite
                | Alakazite
                | Gengarite
                | Gyaradosite
                | Aerodactylite
                | Scizorite
                | Heracronite
                | Houndoominite
                | Tyranitarite
                | Blazikenite
                | Swampertite
                | Sceptilite
                | Gardevoirite
                | Aggronite
                | Manectite
                | Absolite
                | Salamencite
                | Metagrossite
                | Latiasite
                | Latiosite
        )
    }

    pub fn is_z_crystal(self) -> bool {
        use Item::*;
        matches!(
            self,
            NormaliumZ
                | FiriumZ
                | WateriumZ
                | ElectriumZ
                | GrassiumZ
                | IciumZ
                | FightiniumZ
                | PoisoniumZ
                | GroundiumZ
                | FlyiniumZ
                | PsychiumZ
                | BuginiumZ
                | RockiumZ
                | GhostiumZ
                | DragoniumZ
                | DarkiniumZ
                | SteeliumZ
        )
    }

    pub fn is_primal_orb(self) -> bool {
        matches!(self, Item::RedOrb | Item::BlueOrb)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
