//! Light-hearted remarks attached to a lookup: account age, total playtime
//! and the player's dominant genre.
//!
//! Remarks are chosen from a fixed pool using a seed (the account's Steam ID)
//! so the same account always gets the same text.

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 1440;

fn pick(options: &[&'static str], seed: u64) -> &'static str {
    let len = options.len() as u64;
    #[allow(clippy::cast_possible_truncation)]
    options[(seed % len) as usize]
}

#[must_use]
pub fn account_comment(years: i64, seed: u64) -> &'static str {
    let options: &[&'static str] = if years >= 10 {
        &[
            "十年以上的老玩家！Steam 的忠实用户！🏅",
            "骨灰级玩家！见证了 Steam 的发展历程！📜",
            "十年账号， priceless！💎",
            "老玩家认证！你的游戏库一定很精彩！🎮",
        ]
    } else if years >= 5 {
        &[
            "五年以上的资深玩家！👑",
            "你的 Steam 账号已经成年了！🎂",
            "资深用户！游戏品味一定很棒！⭐",
            "五年时光，游戏陪伴！🌟",
        ]
    } else if years >= 2 {
        &[
            "两年以上的玩家！已经找到自己喜欢的游戏类型了吧？🎯",
            "稳步成长的游戏爱好者！📈",
            "两年时光，游戏世界的大门已为你敞开！🚪",
            "不错的游戏历程，继续探索吧！🔍",
        ]
    } else if years >= 1 {
        &[
            "一年以上的玩家！已经度过新手期了！💪",
            "Steam 用户满一年！游戏之旅渐入佳境！🎮",
            "一年的游戏时光，收获满满！🎁",
            "已经是个合格的 Steam 用户了！👍",
        ]
    } else {
        &[
            "Steam 新手！欢迎加入这个大家庭！👋",
            "刚开始的 Steam 之旅，精彩游戏等你发现！✨",
            "新用户！建议从经典游戏开始探索！🗺️",
            "欢迎来到 Steam 世界！🎉",
        ]
    };

    pick(options, seed)
}

#[must_use]
pub fn playtime_comment(total_minutes: u64, seed: u64) -> &'static str {
    let options: &[&'static str] = if total_minutes >= 365 * MINUTES_PER_DAY {
        &[
            "哇塞！你已经花了超过一年的时间在游戏上！这是要申请吉尼斯纪录吗？🎮",
            "一年以上的游戏时长... 你是住在游戏里的吗？🏠",
            "真正的硬核玩家！你的 dedication 令人敬佩！💪",
            "这已经是一份全职工作了！考虑开个直播吗？📺",
        ]
    } else if total_minutes >= 180 * MINUTES_PER_DAY {
        &[
            "半年以上的游戏时光！你是真正的游戏爱好者！🌟",
            "哇！这时长足够从新手变成职业选手了！🏆",
            "半年的时间都在游戏里，你的生活平衡还好吗？😄",
            "这游戏时长... 你的 Steam 账号值钱了！💎",
        ]
    } else if total_minutes >= 90 * MINUTES_PER_DAY {
        &[
            "三个月的游戏时长！你对游戏是真爱啊！❤️",
            "这已经超过了大多数人的游戏时长了！👍",
            "三个月... 你在这个虚拟世界里建立帝国了吗？🏰",
            "资深玩家认证！继续加油！🚀",
        ]
    } else if total_minutes >= 30 * MINUTES_PER_DAY {
        &[
            "一个月的游戏时长！不错的开始！👌",
            "你已经是个合格的游戏玩家了！🎮",
            "这时间足够通关很多3A大作了！🎯",
            "游戏已经成为你生活的一部分了吧？😊",
        ]
    } else if total_minutes >= 7 * MINUTES_PER_DAY {
        &[
            "一周以上的游戏时间！继续保持！💪",
            "你的游戏之旅才刚刚开始！🌟",
            "不错的游戏时长，找到你喜欢的游戏了吗？🎲",
            "休闲玩家的完美时长！享受游戏吧！🎉",
        ]
    } else if total_minutes >= 24 * MINUTES_PER_HOUR {
        &[
            "已经花了一整天在游戏上了！🕐",
            "新手玩家正在成长中！📈",
            "开始探索游戏世界了吗？🗺️",
            "不错的开始，还有更多游戏等你发现！🔍",
        ]
    } else {
        &[
            "游戏新手！还有很多精彩等你探索！✨",
            "刚开始的游戏之旅，慢慢享受吧！🌱",
            "你的游戏故事才刚刚开始书写！📖",
            "轻度玩家， quality over quantity！👌",
        ]
    };

    pick(options, seed)
}

// Genres *************************

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Fps,
    Moba,
    Rpg,
    Mmorpg,
    BattleRoyale,
    Strategy,
    Sandbox,
    Racing,
    Sports,
    Horror,
    Indie,
    Action,
    Adventure,
    Other,
}

impl Genre {
    /// Checked in this order, the first genre with a matching keyword wins.
    const CLASSIFIED: [Self; 13] = [
        Self::Fps,
        Self::Moba,
        Self::Rpg,
        Self::Mmorpg,
        Self::BattleRoyale,
        Self::Strategy,
        Self::Sandbox,
        Self::Racing,
        Self::Sports,
        Self::Horror,
        Self::Indie,
        Self::Action,
        Self::Adventure,
    ];

    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Fps => &[
                "Counter-Strike",
                "CS",
                "Valorant",
                "Overwatch",
                "Call of Duty",
                "Battlefield",
                "Apex Legends",
                "PUBG",
                "Rainbow Six",
                "Team Fortress",
            ],
            Self::Moba => &["Dota 2", "League of Legends", "LOL", "Heroes of the Storm", "Smite"],
            Self::Rpg => &[
                "The Witcher",
                "Elder Scrolls",
                "Skyrim",
                "Fallout",
                "Mass Effect",
                "Dragon Age",
                "Dark Souls",
                "Elden Ring",
                "Final Fantasy",
            ],
            Self::Mmorpg => &[
                "World of Warcraft",
                "WOW",
                "Guild Wars",
                "Final Fantasy XIV",
                "Black Desert",
                "Genshin Impact",
            ],
            Self::BattleRoyale => &["PUBG", "Fortnite", "Apex Legends", "Call of Duty: Warzone"],
            Self::Strategy => &[
                "Civilization",
                "Total War",
                "StarCraft",
                "Age of Empires",
                "Crusader Kings",
                "Europa Universalis",
            ],
            Self::Sandbox => &["Minecraft", "Terraria", "Starbound", "Factorio", "Satisfactory"],
            Self::Racing => &["Forza", "Need for Speed", "Gran Turismo", "F1", "Assetto Corsa"],
            Self::Sports => &["FIFA", "NBA", "eFootball", "Football Manager"],
            Self::Horror => &["Resident Evil", "Silent Hill", "Dead Space", "Outlast", "Amnesia"],
            Self::Indie => &["Hades", "Celeste", "Hollow Knight", "Stardew Valley", "Undertale"],
            Self::Action => &[
                "Grand Theft Auto",
                "GTA",
                "Red Dead Redemption",
                "Assassin's Creed",
                "Watch Dogs",
            ],
            Self::Adventure => &["Uncharted", "Tomb Raider", "Life is Strange", "The Walking Dead"],
            Self::Other => &[],
        }
    }

    /// Guesses a genre from a game's title by case-insensitive keyword match.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        Self::CLASSIFIED
            .into_iter()
            .find(|genre| {
                genre
                    .keywords()
                    .iter()
                    .any(|keyword| name.contains(&keyword.to_lowercase()))
            })
            .unwrap_or(Self::Other)
    }

    /// Style sentences for a high, medium and low share of total playtime.
    const fn styles(self) -> [&'static str; 3] {
        match self {
            Self::Fps => [
                "你是天生的神枪手！FPS 游戏占据了你的大部分时间，反应速度和精准度一定是你的强项！🎯",
                "看来你喜欢快节奏的射击游戏，享受枪林弹雨中的刺激感！🔫",
                "偶尔来几局射击游戏放松，你的游戏口味很均衡！⚖️",
            ],
            Self::Moba => [
                "策略大师！你在 MOBA 游戏中投入了大量时间，团队协作和战术思维是你的强项！🏆",
                "享受 MOBA 带来的竞技乐趣，每局都是新的挑战！⚔️",
                "偶尔打几局 MOBA，轻松娱乐为主！😊",
            ],
            Self::Rpg => [
                "沉浸式玩家！你热爱 RPG 的丰富剧情和角色成长，每个游戏都是一段传奇旅程！📖",
                "喜欢沉浸在游戏世界中，体验不同的人生故事！🌟",
                "偶尔体验 RPG 的精彩剧情，享受慢节奏的游戏时光！☕",
            ],
            Self::Mmorpg => [
                "虚拟世界居民！你在 MMORPG 中建立了第二个家，社交和冒险是你游戏生活的核心！🌍",
                "享受 MMORPG 的社交乐趣，和朋友一起冒险是最棒的！👥",
                "偶尔登录 MMORPG 看看，保持与游戏世界的联系！🔗",
            ],
            Self::BattleRoyale => [
                "生存专家！你在 Battle Royale 游戏中磨练出了极强的生存本能和战术意识！🏆",
                "享受大逃杀的紧张刺激，每局都是全新的冒险！🪂",
                "偶尔来一局大逃杀，体验心跳加速的感觉！💓",
            ],
            Self::Strategy => [
                "战略大师！你热爱思考和规划，策略游戏是你展现智慧的舞台！🧠",
                "享受策略游戏带来的智力挑战，每一步都深思熟虑！♟️",
                "偶尔玩玩策略游戏，锻炼一下大脑！🤔",
            ],
            Self::Sandbox => [
                "创造大师！你在沙盒游戏中释放了无限创意，建造了属于自己的世界！🏗️",
                "喜欢沙盒游戏的自由度，随心所欲地创造和探索！🔨",
                "偶尔在沙盒游戏中放松一下，享受创造的乐趣！✨",
            ],
            Self::Racing => [
                "速度狂人！你对赛车游戏的热爱让你的反应速度达到了极致！🏎️",
                "享受速度与激情的碰撞，每场比赛都是挑战！🏁",
                "偶尔来几圈赛车，感受速度的快感！💨",
            ],
            Self::Sports => [
                "体育达人！你在体育游戏中展现了出色的运动天赋和战术理解！⚽",
                "热爱体育游戏，享受竞技的乐趣！🏀",
                "偶尔玩玩体育游戏，保持运动精神！🏃",
            ],
            Self::Horror => [
                "恐怖游戏勇士！你的胆量令人佩服，越是恐怖越要挑战！👻",
                "喜欢恐怖游戏带来的刺激感，享受心跳加速的时刻！😱",
                "偶尔挑战恐怖游戏，测试一下自己的胆量！🎃",
            ],
            Self::Indie => [
                "独立游戏鉴赏家！你善于发现小众精品，品味独特！💎",
                "喜欢探索独立游戏的创意世界，支持小众开发者！🌟",
                "偶尔尝试独立游戏，发现不一样的游戏体验！🔍",
            ],
            Self::Action => [
                "动作游戏大师！你在动作游戏中展现了出色的操作技巧和反应速度！💪",
                "享受动作游戏带来的爽快战斗体验！⚔️",
                "偶尔玩玩动作游戏，释放一下压力！💥",
            ],
            Self::Adventure => [
                "冒险家！你热爱探索未知的世界，每个游戏都是新的冒险！🗺️",
                "喜欢冒险游戏的探索元素，享受发现秘密的乐趣！🔍",
                "偶尔来场冒险，体验不同的游戏世界！🌄",
            ],
            Self::Other => [
                "多元化玩家！你的游戏品味非常广泛，各种类型的游戏都能享受！🎮",
                "游戏口味多样，不拘泥于特定类型！🌈",
                "还在探索中，寻找最适合自己的游戏类型！🔍",
            ],
        }
    }
}

pub const EMPTY_LIBRARY_STYLE: &str = "你的游戏库还在建设中，期待发现你的游戏风格！🎮";

/// Playtime accumulated per genre, in the order genres were first seen.
#[derive(Debug, Default)]
pub struct GenreTally(Vec<(Genre, u64)>);

impl GenreTally {
    pub fn add(&mut self, genre: Genre, minutes: u64) {
        match self.0.iter_mut().find(|(g, _)| *g == genre) {
            Some((_, total)) => *total += minutes,
            None => self.0.push((genre, minutes)),
        }
    }

    /// Genre with the most playtime. Ties go to the genre seen first.
    #[must_use]
    pub fn top(&self) -> Option<(Genre, u64)> {
        self.0.iter().copied().fold(None, |best, entry| match best {
            Some((_, minutes)) if minutes >= entry.1 => best,
            _ => Some(entry),
        })
    }

    /// Describes the player by the share of playtime their top genre takes up.
    #[must_use]
    pub fn gaming_style(&self, total_minutes: u64) -> &'static str {
        let Some((genre, minutes)) = self.top() else {
            return EMPTY_LIBRARY_STYLE;
        };
        if total_minutes == 0 {
            return EMPTY_LIBRARY_STYLE;
        }

        #[allow(clippy::cast_precision_loss)]
        let share = minutes as f64 / total_minutes as f64 * 100.0;
        let [high, medium, low] = genre.styles();
        if share >= 40.0 {
            high
        } else if share >= 20.0 {
            medium
        } else {
            low
        }
    }
}
