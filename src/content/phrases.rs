// Taunt phrases shown in the letter subtitle, one table per escalation phase.

pub static CUTE_PHRASES: [&str; 5] = [
    "Are you sure?",
    "Pookie please...",
    "Think about it 🥺",
    "Waittttt",
    "Just one little Yes?",
];

pub static DRAMATIC_PHRASES: [&str; 5] = [
    "Why are you like this?",
    "That kinda hurt...",
    "The Yes button misses you 💕",
    "You're making this harder than it needs to be",
    "The cat is watching 👀",
];

pub static EMOTIONAL_PHRASES: [&str; 6] = [
    "I'm gonna cry 😭",
    "You can't outrun love 💘",
    "This was supposed to be romantic...",
    "I made this for YOU 😢",
    "You're breaking my pixel heart 💔",
    "Are you allergic to happiness?",
];

pub static UNHINGED_PHRASES: [&str; 23] = [
    "Error. Reality collapsing.",
    "The Yes button grows stronger.",
    "This is destiny. Accept it.",
    "You will click Yes.",
    "Stop running.",
    "We both know the answer.",
    "The universe demands it.",
    "You can't escape forever.",
    "Why are you fighting love?",
    "Love always wins.",
    "This is my villain arc.",
    "You activated hard mode.",
    "Boss music intensifies.",
    "You're not winning this.",
    "Plot twist: You love me.",
    "Your finger slipped.",
    "The Yes button is inevitable.",
    "This is my canon event.",
    "Just accept it.",
    "This is the endgame.",
    "The prophecy foretold this.",
    "You are delaying the inevitable.",
    "Stop testing destiny.",
];
