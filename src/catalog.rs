use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bot, Role::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Bot => "bot",
            Role::Support => "support",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "top" => Some(Role::Top),
            "jungle" => Some(Role::Jungle),
            "mid" => Some(Role::Mid),
            "bot" => Some(Role::Bot),
            "support" => Some(Role::Support),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageType {
    Physical,
    Magic,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    Early,
    Mid,
    Late,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Fighter,
    Tank,
    Mage,
    Assassin,
    Marksman,
    Support,
    Specialist,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Fighter => "fighter",
            Tag::Tank => "tank",
            Tag::Mage => "mage",
            Tag::Assassin => "assassin",
            Tag::Marksman => "marksman",
            Tag::Support => "support",
            Tag::Specialist => "specialist",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChampionEntry {
    pub name: String,
    pub primary_role: Role,
    pub secondary_role: Option<Role>,
    pub tags: Vec<Tag>,
    pub damage_type: DamageType,
    pub cc_score: u8, // 0=none, 1=low, 2=medium, 3=high
    pub scaling: Scaling,
    pub is_engage: bool,
}

impl ChampionEntry {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Damage type distribution over a champion set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageProfile {
    pub physical: u32,
    pub magic: u32,
    pub mixed: u32,
}

impl DamageProfile {
    pub fn total(&self) -> u32 {
        self.physical + self.magic + self.mixed
    }

    /// 0-1 balance score, 1 = perfectly balanced physical/magic.
    pub fn balance(&self) -> f64 {
        let total = self.total().max(1) as f64;
        1.0 - (self.physical as f64 - self.magic as f64).abs() / total
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScalingProfile {
    pub early: u32,
    pub mid: u32,
    pub late: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoleCoverage {
    pub top: bool,
    pub jungle: bool,
    pub mid: bool,
    pub bot: bool,
    pub support: bool,
}

impl RoleCoverage {
    pub fn filled_count(&self) -> usize {
        [self.top, self.jungle, self.mid, self.bot, self.support]
            .iter()
            .filter(|f| **f)
            .count()
    }

    /// All 5 primary roles represented. Unreachable for sets smaller than 5.
    pub fn complete(&self) -> bool {
        self.filled_count() >= 5
    }

    pub fn missing_roles(&self) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|r| !self.has(*r))
            .collect()
    }

    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Top => self.top,
            Role::Jungle => self.jungle,
            Role::Mid => self.mid,
            Role::Bot => self.bot,
            Role::Support => self.support,
        }
    }

    fn fill(&mut self, role: Role) {
        match role {
            Role::Top => self.top = true,
            Role::Jungle => self.jungle = true,
            Role::Mid => self.mid = true,
            Role::Bot => self.bot = true,
            Role::Support => self.support = true,
        }
    }
}

/// Static champion metadata covering the pro-play roster, keyed by canonical
/// name, with alias normalization so external data never fragments one
/// champion's statistics across two keys.
pub struct ChampionCatalog {
    entries: HashMap<String, ChampionEntry>,
    aliases: HashMap<String, String>,
}

fn add(
    entries: &mut HashMap<String, ChampionEntry>,
    name: &str,
    primary: Role,
    secondary: Option<Role>,
    tags: &[Tag],
    damage: DamageType,
    cc: u8,
    scaling: Scaling,
    engage: bool,
) {
    entries.insert(
        name.to_string(),
        ChampionEntry {
            name: name.to_string(),
            primary_role: primary,
            secondary_role: secondary,
            tags: tags.to_vec(),
            damage_type: damage,
            cc_score: cc,
            scaling,
            is_engage: engage,
        },
    );
}

impl ChampionCatalog {
    pub fn new() -> Self {
        use DamageType as D;
        use Role as R;
        use Scaling as S;
        use Tag as T;

        let mut m = HashMap::new();

        // Top laners
        add(&mut m, "Aatrox", R::Top, Some(R::Mid), &[T::Fighter], D::Physical, 2, S::Mid, true);
        add(&mut m, "Camille", R::Top, None, &[T::Fighter, T::Assassin], D::Mixed, 2, S::Mid, true);
        add(&mut m, "Cho'Gath", R::Top, None, &[T::Tank, T::Mage], D::Magic, 3, S::Mid, false);
        add(&mut m, "Darius", R::Top, None, &[T::Fighter], D::Physical, 2, S::Early, true);
        add(&mut m, "Dr. Mundo", R::Top, Some(R::Jungle), &[T::Tank, T::Fighter], D::Magic, 1, S::Late, false);
        add(&mut m, "Fiora", R::Top, None, &[T::Fighter, T::Assassin], D::Physical, 1, S::Late, false);
        add(&mut m, "Gangplank", R::Top, Some(R::Mid), &[T::Fighter, T::Specialist], D::Mixed, 1, S::Late, false);
        add(&mut m, "Gnar", R::Top, None, &[T::Fighter, T::Tank], D::Mixed, 3, S::Mid, true);
        add(&mut m, "Gragas", R::Top, Some(R::Jungle), &[T::Fighter, T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Gwen", R::Top, None, &[T::Fighter, T::Mage], D::Magic, 1, S::Late, false);
        add(&mut m, "Irelia", R::Top, Some(R::Mid), &[T::Fighter, T::Assassin], D::Physical, 2, S::Mid, false);
        add(&mut m, "Jax", R::Top, Some(R::Jungle), &[T::Fighter], D::Mixed, 1, S::Late, false);
        add(&mut m, "Jayce", R::Top, Some(R::Mid), &[T::Fighter, T::Marksman], D::Physical, 1, S::Early, false);
        add(&mut m, "K'Sante", R::Top, None, &[T::Fighter, T::Tank], D::Mixed, 3, S::Mid, true);
        add(&mut m, "Kennen", R::Top, None, &[T::Mage, T::Fighter], D::Magic, 3, S::Mid, true);
        add(&mut m, "Kled", R::Top, None, &[T::Fighter], D::Physical, 2, S::Early, true);
        add(&mut m, "Malphite", R::Top, None, &[T::Tank, T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Mordekaiser", R::Top, None, &[T::Fighter, T::Mage], D::Magic, 1, S::Mid, false);
        add(&mut m, "Nasus", R::Top, None, &[T::Fighter, T::Tank], D::Physical, 2, S::Late, false);
        add(&mut m, "Olaf", R::Top, Some(R::Jungle), &[T::Fighter], D::Physical, 1, S::Early, false);
        add(&mut m, "Ornn", R::Top, None, &[T::Tank], D::Magic, 3, S::Mid, true);
        add(&mut m, "Poppy", R::Top, Some(R::Jungle), &[T::Tank, T::Fighter], D::Physical, 3, S::Mid, true);
        add(&mut m, "Renekton", R::Top, None, &[T::Fighter], D::Physical, 2, S::Early, true);
        add(&mut m, "Riven", R::Top, None, &[T::Fighter, T::Assassin], D::Physical, 2, S::Mid, false);
        add(&mut m, "Rumble", R::Top, Some(R::Mid), &[T::Mage, T::Fighter], D::Magic, 1, S::Mid, false);
        add(&mut m, "Sett", R::Top, Some(R::Support), &[T::Fighter, T::Tank], D::Physical, 2, S::Early, true);
        add(&mut m, "Shen", R::Top, Some(R::Support), &[T::Tank], D::Mixed, 2, S::Mid, true);
        add(&mut m, "Sion", R::Top, None, &[T::Tank], D::Physical, 3, S::Mid, true);
        add(&mut m, "Tahm Kench", R::Top, Some(R::Support), &[T::Tank, T::Support], D::Magic, 3, S::Mid, false);
        add(&mut m, "Tryndamere", R::Top, None, &[T::Fighter, T::Assassin], D::Physical, 0, S::Late, false);
        add(&mut m, "Urgot", R::Top, None, &[T::Fighter, T::Tank], D::Physical, 2, S::Mid, false);
        add(&mut m, "Volibear", R::Top, Some(R::Jungle), &[T::Fighter, T::Tank], D::Mixed, 2, S::Early, true);
        add(&mut m, "Yasuo", R::Mid, Some(R::Top), &[T::Fighter, T::Assassin], D::Physical, 2, S::Late, false);
        add(&mut m, "Yone", R::Mid, Some(R::Top), &[T::Fighter, T::Assassin], D::Mixed, 2, S::Late, true);

        // Junglers
        add(&mut m, "Amumu", R::Jungle, Some(R::Support), &[T::Tank, T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Bel'Veth", R::Jungle, None, &[T::Fighter], D::Physical, 1, S::Late, false);
        add(&mut m, "Diana", R::Jungle, Some(R::Mid), &[T::Mage, T::Assassin], D::Magic, 2, S::Mid, true);
        add(&mut m, "Ekko", R::Jungle, Some(R::Mid), &[T::Assassin, T::Mage], D::Magic, 1, S::Mid, false);
        add(&mut m, "Elise", R::Jungle, None, &[T::Mage, T::Assassin], D::Magic, 2, S::Early, false);
        add(&mut m, "Graves", R::Jungle, None, &[T::Marksman, T::Fighter], D::Physical, 1, S::Mid, false);
        add(&mut m, "Hecarim", R::Jungle, None, &[T::Fighter, T::Tank], D::Physical, 2, S::Mid, true);
        add(&mut m, "Ivern", R::Jungle, None, &[T::Support, T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Jarvan IV", R::Jungle, None, &[T::Fighter, T::Tank], D::Physical, 3, S::Early, true);
        add(&mut m, "Karthus", R::Jungle, Some(R::Mid), &[T::Mage], D::Magic, 1, S::Late, false);
        add(&mut m, "Kayn", R::Jungle, None, &[T::Fighter, T::Assassin], D::Physical, 1, S::Mid, false);
        add(&mut m, "Kha'Zix", R::Jungle, None, &[T::Assassin], D::Physical, 1, S::Mid, false);
        add(&mut m, "Kindred", R::Jungle, None, &[T::Marksman], D::Physical, 1, S::Mid, false);
        add(&mut m, "Lee Sin", R::Jungle, None, &[T::Fighter, T::Assassin], D::Physical, 2, S::Early, true);
        add(&mut m, "Lillia", R::Jungle, Some(R::Top), &[T::Mage, T::Fighter], D::Magic, 2, S::Mid, false);
        add(&mut m, "Maokai", R::Jungle, Some(R::Support), &[T::Tank, T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Master Yi", R::Jungle, None, &[T::Fighter, T::Assassin], D::Physical, 0, S::Late, false);
        add(&mut m, "Nidalee", R::Jungle, None, &[T::Mage, T::Assassin], D::Magic, 0, S::Early, false);
        add(&mut m, "Nocturne", R::Jungle, None, &[T::Assassin, T::Fighter], D::Physical, 2, S::Mid, true);
        add(&mut m, "Nunu & Willump", R::Jungle, None, &[T::Tank, T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Rek'Sai", R::Jungle, None, &[T::Fighter], D::Physical, 2, S::Early, true);
        add(&mut m, "Sejuani", R::Jungle, Some(R::Top), &[T::Tank], D::Magic, 3, S::Mid, true);
        add(&mut m, "Skarner", R::Jungle, None, &[T::Fighter, T::Tank], D::Mixed, 3, S::Mid, true);
        add(&mut m, "Udyr", R::Jungle, Some(R::Top), &[T::Fighter, T::Tank], D::Mixed, 2, S::Mid, true);
        add(&mut m, "Vi", R::Jungle, None, &[T::Fighter, T::Assassin], D::Physical, 3, S::Mid, true);
        add(&mut m, "Viego", R::Jungle, None, &[T::Fighter, T::Assassin], D::Physical, 1, S::Mid, false);
        add(&mut m, "Warwick", R::Jungle, Some(R::Top), &[T::Fighter, T::Tank], D::Mixed, 2, S::Mid, true);
        add(&mut m, "Wukong", R::Jungle, Some(R::Top), &[T::Fighter, T::Tank], D::Physical, 2, S::Mid, true);
        add(&mut m, "Xin Zhao", R::Jungle, None, &[T::Fighter, T::Assassin], D::Physical, 2, S::Early, true);
        add(&mut m, "Zac", R::Jungle, None, &[T::Tank], D::Magic, 3, S::Mid, true);

        // Mid laners
        add(&mut m, "Ahri", R::Mid, None, &[T::Mage, T::Assassin], D::Magic, 2, S::Mid, false);
        add(&mut m, "Akali", R::Mid, Some(R::Top), &[T::Assassin, T::Mage], D::Magic, 1, S::Mid, false);
        add(&mut m, "Anivia", R::Mid, None, &[T::Mage], D::Magic, 2, S::Late, false);
        add(&mut m, "Annie", R::Mid, None, &[T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Aurelion Sol", R::Mid, None, &[T::Mage], D::Magic, 2, S::Late, false);
        add(&mut m, "Aurora", R::Mid, Some(R::Top), &[T::Mage, T::Assassin], D::Magic, 2, S::Mid, false);
        add(&mut m, "Azir", R::Mid, None, &[T::Mage], D::Magic, 2, S::Late, false);
        add(&mut m, "Cassiopeia", R::Mid, None, &[T::Mage], D::Magic, 2, S::Late, false);
        add(&mut m, "Corki", R::Mid, None, &[T::Marksman, T::Mage], D::Magic, 0, S::Mid, false);
        add(&mut m, "Galio", R::Mid, Some(R::Support), &[T::Tank, T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Hwei", R::Mid, None, &[T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Kassadin", R::Mid, None, &[T::Assassin, T::Mage], D::Magic, 1, S::Late, false);
        add(&mut m, "Katarina", R::Mid, None, &[T::Assassin, T::Mage], D::Magic, 0, S::Mid, false);
        add(&mut m, "LeBlanc", R::Mid, None, &[T::Assassin, T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Lissandra", R::Mid, None, &[T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Lux", R::Mid, Some(R::Support), &[T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Malzahar", R::Mid, None, &[T::Mage, T::Assassin], D::Magic, 3, S::Mid, false);
        add(&mut m, "Naafiri", R::Mid, None, &[T::Assassin], D::Physical, 1, S::Mid, false);
        add(&mut m, "Neeko", R::Mid, Some(R::Support), &[T::Mage], D::Magic, 3, S::Mid, true);
        add(&mut m, "Orianna", R::Mid, None, &[T::Mage], D::Magic, 2, S::Mid, true);
        add(&mut m, "Qiyana", R::Mid, None, &[T::Assassin], D::Physical, 2, S::Mid, false);
        add(&mut m, "Ryze", R::Mid, None, &[T::Mage], D::Magic, 1, S::Mid, false);
        add(&mut m, "Smolder", R::Mid, Some(R::Bot), &[T::Mage, T::Marksman], D::Magic, 1, S::Late, false);
        add(&mut m, "Sylas", R::Mid, Some(R::Top), &[T::Mage, T::Assassin], D::Magic, 2, S::Mid, true);
        add(&mut m, "Syndra", R::Mid, None, &[T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Taliyah", R::Mid, Some(R::Jungle), &[T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Talon", R::Mid, Some(R::Jungle), &[T::Assassin], D::Physical, 1, S::Mid, false);
        add(&mut m, "Twisted Fate", R::Mid, None, &[T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Veigar", R::Mid, None, &[T::Mage], D::Magic, 2, S::Late, false);
        add(&mut m, "Vex", R::Mid, None, &[T::Mage], D::Magic, 2, S::Mid, true);
        add(&mut m, "Viktor", R::Mid, None, &[T::Mage], D::Magic, 2, S::Late, false);
        add(&mut m, "Vladimir", R::Mid, Some(R::Top), &[T::Mage], D::Magic, 1, S::Late, false);
        add(&mut m, "Xerath", R::Mid, Some(R::Support), &[T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Zed", R::Mid, None, &[T::Assassin], D::Physical, 0, S::Mid, false);
        add(&mut m, "Ziggs", R::Mid, Some(R::Bot), &[T::Mage], D::Magic, 1, S::Mid, false);
        add(&mut m, "Zoe", R::Mid, None, &[T::Mage], D::Magic, 2, S::Mid, false);

        // Bot laners
        add(&mut m, "Aphelios", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Late, false);
        add(&mut m, "Ashe", R::Bot, Some(R::Support), &[T::Marksman, T::Support], D::Physical, 3, S::Mid, true);
        add(&mut m, "Caitlyn", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Early, false);
        add(&mut m, "Draven", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Early, false);
        add(&mut m, "Ezreal", R::Bot, None, &[T::Marksman, T::Mage], D::Mixed, 0, S::Mid, false);
        add(&mut m, "Jhin", R::Bot, None, &[T::Marksman, T::Mage], D::Physical, 2, S::Mid, false);
        add(&mut m, "Jinx", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Late, false);
        add(&mut m, "Kai'Sa", R::Bot, None, &[T::Marksman, T::Assassin], D::Mixed, 0, S::Late, false);
        add(&mut m, "Kalista", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Mid, true);
        add(&mut m, "Kog'Maw", R::Bot, None, &[T::Marksman, T::Mage], D::Mixed, 1, S::Late, false);
        add(&mut m, "Lucian", R::Bot, Some(R::Mid), &[T::Marksman], D::Physical, 0, S::Early, false);
        add(&mut m, "Miss Fortune", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Mid, false);
        add(&mut m, "Nilah", R::Bot, None, &[T::Fighter, T::Marksman], D::Physical, 1, S::Mid, true);
        add(&mut m, "Samira", R::Bot, None, &[T::Marksman, T::Assassin], D::Physical, 1, S::Mid, true);
        add(&mut m, "Sivir", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Mid, false);
        add(&mut m, "Tristana", R::Bot, Some(R::Mid), &[T::Marksman, T::Assassin], D::Physical, 1, S::Mid, false);
        add(&mut m, "Twitch", R::Bot, None, &[T::Marksman, T::Assassin], D::Mixed, 1, S::Late, false);
        add(&mut m, "Varus", R::Bot, Some(R::Mid), &[T::Marksman, T::Mage], D::Mixed, 2, S::Mid, false);
        add(&mut m, "Vayne", R::Bot, Some(R::Top), &[T::Marksman, T::Assassin], D::Physical, 1, S::Late, false);
        add(&mut m, "Xayah", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Mid, false);
        add(&mut m, "Zeri", R::Bot, None, &[T::Marksman], D::Physical, 1, S::Late, false);

        // Supports
        add(&mut m, "Alistar", R::Support, None, &[T::Tank, T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Bard", R::Support, None, &[T::Mage, T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Blitzcrank", R::Support, None, &[T::Tank, T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Braum", R::Support, None, &[T::Tank, T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Janna", R::Support, None, &[T::Mage, T::Support], D::Magic, 2, S::Mid, false);
        add(&mut m, "Karma", R::Support, Some(R::Mid), &[T::Mage, T::Support], D::Magic, 1, S::Mid, false);
        add(&mut m, "Leona", R::Support, None, &[T::Tank, T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Lulu", R::Support, None, &[T::Mage, T::Support], D::Magic, 2, S::Mid, false);
        add(&mut m, "Milio", R::Support, None, &[T::Mage, T::Support], D::Magic, 1, S::Mid, false);
        add(&mut m, "Morgana", R::Support, Some(R::Mid), &[T::Mage, T::Support], D::Magic, 3, S::Mid, false);
        add(&mut m, "Nami", R::Support, None, &[T::Mage, T::Support], D::Magic, 3, S::Mid, false);
        add(&mut m, "Nautilus", R::Support, None, &[T::Tank, T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Pantheon", R::Support, Some(R::Mid), &[T::Fighter, T::Assassin], D::Physical, 2, S::Early, true);
        add(&mut m, "Pyke", R::Support, None, &[T::Assassin, T::Support], D::Physical, 3, S::Mid, true);
        add(&mut m, "Rakan", R::Support, None, &[T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Rell", R::Support, None, &[T::Tank, T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Renata Glasc", R::Support, None, &[T::Mage, T::Support], D::Magic, 2, S::Mid, false);
        add(&mut m, "Seraphine", R::Support, Some(R::Mid), &[T::Mage, T::Support], D::Magic, 2, S::Mid, false);
        add(&mut m, "Sona", R::Support, None, &[T::Mage, T::Support], D::Magic, 2, S::Late, false);
        add(&mut m, "Soraka", R::Support, None, &[T::Mage, T::Support], D::Magic, 1, S::Mid, false);
        add(&mut m, "Swain", R::Support, Some(R::Mid), &[T::Mage], D::Magic, 2, S::Mid, false);
        add(&mut m, "Thresh", R::Support, None, &[T::Tank, T::Support], D::Magic, 3, S::Mid, true);
        add(&mut m, "Zilean", R::Support, Some(R::Mid), &[T::Mage, T::Support], D::Magic, 2, S::Late, false);
        add(&mut m, "Zyra", R::Support, None, &[T::Mage, T::Support], D::Magic, 2, S::Mid, false);

        let aliases = [
            ("Nunu", "Nunu & Willump"),
            ("Nunu &amp; Willump", "Nunu & Willump"),
            ("Dr Mundo", "Dr. Mundo"),
            ("MonkeyKing", "Wukong"),
            ("Jarvan", "Jarvan IV"),
            ("JarvanIV", "Jarvan IV"),
            ("TwistedFate", "Twisted Fate"),
            ("MissFortune", "Miss Fortune"),
            ("TahmKench", "Tahm Kench"),
            ("AurelionSol", "Aurelion Sol"),
            ("LeeSin", "Lee Sin"),
            ("MasterYi", "Master Yi"),
            ("XinZhao", "Xin Zhao"),
            ("KogMaw", "Kog'Maw"),
            ("KhaZix", "Kha'Zix"),
            ("ChoGath", "Cho'Gath"),
            ("KSante", "K'Sante"),
            ("BelVeth", "Bel'Veth"),
            ("RekSai", "Rek'Sai"),
            ("RenataGlasc", "Renata Glasc"),
        ]
        .iter()
        .map(|(a, c)| (a.to_string(), c.to_string()))
        .collect();

        ChampionCatalog {
            entries: m,
            aliases,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ChampionEntry> {
        if let Some(entry) = self.entries.get(name) {
            return Some(entry);
        }
        let canonical = self.normalize(name);
        self.entries.get(&canonical)
    }

    /// Normalize an external champion name to its canonical catalog key.
    /// Unknown names pass through unchanged.
    pub fn normalize(&self, name: &str) -> String {
        if self.entries.contains_key(name) {
            return name.to_string();
        }
        if let Some(canonical) = self.aliases.get(name) {
            return canonical.clone();
        }

        // Punctuation/space-insensitive alias match
        let stripped = strip_punctuation(name);
        for (alias, canonical) in &self.aliases {
            if strip_punctuation(alias) == stripped {
                return canonical.clone();
            }
        }

        // Case-insensitive match against canonical keys
        let lower = name.to_lowercase();
        for key in self.entries.keys() {
            if key.to_lowercase() == lower || strip_punctuation(key) == stripped {
                return key.clone();
            }
        }

        name.to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn damage_profile<S: AsRef<str>>(&self, champions: &[S]) -> DamageProfile {
        let mut profile = DamageProfile::default();
        for name in champions {
            if let Some(entry) = self.get(name.as_ref()) {
                match entry.damage_type {
                    DamageType::Physical => profile.physical += 1,
                    DamageType::Magic => profile.magic += 1,
                    DamageType::Mixed => profile.mixed += 1,
                }
            }
        }
        profile
    }

    /// Average CC score over known champions in the set, 0 if none.
    pub fn cc_average<S: AsRef<str>>(&self, champions: &[S]) -> f64 {
        let scores: Vec<f64> = champions
            .iter()
            .filter_map(|n| self.get(n.as_ref()))
            .map(|e| e.cc_score as f64)
            .collect();
        if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        }
    }

    pub fn scaling_profile<S: AsRef<str>>(&self, champions: &[S]) -> ScalingProfile {
        let mut profile = ScalingProfile::default();
        for name in champions {
            if let Some(entry) = self.get(name.as_ref()) {
                match entry.scaling {
                    Scaling::Early => profile.early += 1,
                    Scaling::Mid => profile.mid += 1,
                    Scaling::Late => profile.late += 1,
                }
            }
        }
        profile
    }

    pub fn role_coverage<S: AsRef<str>>(&self, champions: &[S]) -> RoleCoverage {
        let mut coverage = RoleCoverage::default();
        for name in champions {
            if let Some(entry) = self.get(name.as_ref()) {
                coverage.fill(entry.primary_role);
            }
        }
        coverage
    }

    pub fn engage_count<S: AsRef<str>>(&self, champions: &[S]) -> usize {
        champions
            .iter()
            .filter_map(|n| self.get(n.as_ref()))
            .filter(|e| e.is_engage)
            .count()
    }

    pub fn tag_count<S: AsRef<str>>(&self, champions: &[S], tag: Tag) -> usize {
        champions
            .iter()
            .filter_map(|n| self.get(n.as_ref()))
            .filter(|e| e.has_tag(tag))
            .count()
    }
}

impl Default for ChampionCatalog {
    fn default() -> Self {
        ChampionCatalog::new()
    }
}

fn strip_punctuation(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\'' | ' ' | '.' | '&' | ';'))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_resolution_never_fragments() {
        let catalog = ChampionCatalog::new();
        assert_eq!(catalog.normalize("Nunu"), "Nunu & Willump");
        assert_eq!(catalog.normalize("MonkeyKing"), "Wukong");
        assert_eq!(catalog.normalize("TahmKench"), "Tahm Kench");
        assert_eq!(catalog.normalize("ahri"), "Ahri");
        // Already canonical stays canonical
        assert_eq!(catalog.normalize("Wukong"), "Wukong");
        // Unknown names pass through
        assert_eq!(catalog.normalize("NotAChampion"), "NotAChampion");
    }

    #[test]
    fn lookup_works_through_aliases() {
        let catalog = ChampionCatalog::new();
        let entry = catalog.get("KSante").expect("alias lookup");
        assert_eq!(entry.name, "K'Sante");
        assert!(entry.is_engage);
    }

    #[test]
    fn role_coverage_incomplete_below_five() {
        let catalog = ChampionCatalog::new();
        let trio = ["Malphite", "Orianna", "Amumu"];
        let coverage = catalog.role_coverage(&trio);
        assert!(!coverage.complete());
        assert!(coverage.top);
        assert!(coverage.mid);
        assert!(coverage.jungle);
        assert_eq!(coverage.missing_roles(), vec![Role::Bot, Role::Support]);

        let full = ["Malphite", "Amumu", "Orianna", "Jinx", "Thresh"];
        assert!(catalog.role_coverage(&full).complete());
    }

    #[test]
    fn damage_profile_counts_types() {
        let catalog = ChampionCatalog::new();
        let comp = ["Darius", "Jinx", "Orianna", "Ezreal"];
        let profile = catalog.damage_profile(&comp);
        assert_eq!(profile.physical, 2);
        assert_eq!(profile.magic, 1);
        assert_eq!(profile.mixed, 1);
        assert!(profile.balance() > 0.0 && profile.balance() <= 1.0);
    }

    #[test]
    fn cc_average_is_zero_for_empty_set() {
        let catalog = ChampionCatalog::new();
        let empty: [&str; 0] = [];
        assert_eq!(catalog.cc_average(&empty), 0.0);
    }
}
