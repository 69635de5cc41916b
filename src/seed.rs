//! Sample prompts used to populate an empty or unreadable library

use chrono::{DateTime, TimeZone, Utc};

use crate::prompt::Prompt;

struct SeedPrompt {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
    favorite: bool,
    created: (u32, u32, u32, u32),
    use_count: u32,
}

const SEED: &[SeedPrompt] = &[
    SeedPrompt {
        id: "prompt-1",
        title: "Website Redesign Expert",
        description: "Perfect for getting detailed website redesign suggestions with a focus on UX and conversion optimization.",
        content: "Act as a senior UX designer with 15+ years of experience in conversion optimization. Review my website [URL] and suggest improvements focusing on: user flow, call-to-actions, visual hierarchy, and mobile responsiveness. Include specific examples and mockup descriptions.",
        tags: &["Business", "Design"],
        favorite: false,
        created: (1, 12, 0, 0),
        use_count: 7,
    },
    SeedPrompt {
        id: "prompt-2",
        title: "Python Debugging Assistant",
        description: "Helps identify and fix bugs in your Python code with clear explanations of the issues.",
        content: "You are an expert Python developer with strong debugging skills. I'll share Python code that has bugs or isn't working as expected. Please:\n1. Identify all bugs and issues\n2. Explain why each is problematic\n3. Provide fixed code with comments\n4. Suggest best practices improvements\n\nHere's my code:\n```python\n[paste your code here]\n```",
        tags: &["Coding", "Python"],
        favorite: false,
        created: (2, 14, 30, 0),
        use_count: 12,
    },
    SeedPrompt {
        id: "prompt-3",
        title: "Creative Story Generator",
        description: "Generates imaginative short stories based on your inputs and preferences.",
        content: "Write a captivating short story (800-1000 words) based on these parameters:\n\nGenre: [genre]\nMain character: [brief description]\nSetting: [place/time]\nTheme: [central theme]\nPlot element to include: [specific element]\nTone: [mood/tone]\n\nMake the story engaging with a clear beginning, middle, and end. Include vivid sensory details and meaningful dialogue. The ending should be [type of ending].",
        tags: &["Creative", "Writing"],
        favorite: true,
        created: (3, 9, 15, 0),
        use_count: 18,
    },
    SeedPrompt {
        id: "prompt-4",
        title: "Academic Research Helper",
        description: "Helps organize research, structure papers, and formulate strong arguments for academic writing.",
        content: "As an experienced academic research assistant, help me organize my research on [topic]. I need assistance with:\n\n1. Creating a structured outline for a [length] paper\n2. Identifying key areas to focus my research\n3. Formulating a strong thesis statement\n4. Suggesting how to approach the literature review\n5. Developing compelling arguments\n\nMy current approach is [brief description]. My deadline is [date].",
        tags: &["Academic", "Research"],
        favorite: false,
        created: (5, 16, 45, 0),
        use_count: 5,
    },
    SeedPrompt {
        id: "prompt-5",
        title: "Product Description Writer",
        description: "Creates compelling product descriptions that highlight benefits and features effectively.",
        content: "Act as an expert e-commerce copywriter. Write a compelling product description for [product name] with these details:\n\nProduct: [basic details]\nKey features: [list 3-5 features]\nTarget audience: [demographic]\nPrice point: [price range]\nBrand voice: [tone/style]\n\nCreate a description with:\n- An attention-grabbing headline\n- 3-4 paragraphs of persuasive copy (150-200 words total)\n- Bullet points highlighting key features and benefits\n- A clear call-to-action",
        tags: &["Business", "Marketing"],
        favorite: false,
        created: (7, 11, 20, 0),
        use_count: 9,
    },
    SeedPrompt {
        id: "prompt-6",
        title: "Code Refactoring Guide",
        description: "Helps optimize and improve existing code for better performance and readability.",
        content: "You are a senior software engineer with expertise in clean code and refactoring. Review my [language] code below and:\n\n1. Identify code smells and potential issues\n2. Suggest refactoring strategies to improve:\n   - Readability\n   - Maintainability\n   - Performance\n   - Test coverage opportunities\n3. Provide refactored code examples with explanations\n4. Recommend design patterns if applicable\n\nHere's my code:\n```\n[paste code here]\n```",
        tags: &["Coding", "Best Practices"],
        favorite: true,
        created: (8, 13, 10, 0),
        use_count: 15,
    },
];

/// All seed dates fall in April 2025
fn april_2025(day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, day, hour, min, sec)
        .single()
        .unwrap_or_default()
}

/// Build the fixed sample set, in store order
pub fn sample_prompts() -> Vec<Prompt> {
    SEED.iter()
        .map(|seed| {
            let (day, hour, min, sec) = seed.created;
            let created_at = april_2025(day, hour, min, sec);
            Prompt {
                id: seed.id.to_string(),
                title: seed.title.to_string(),
                description: Some(seed.description.to_string()),
                content: seed.content.to_string(),
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                favorite: seed.favorite,
                created_at,
                modified_at: created_at,
                use_count: seed.use_count,
            }
        })
        .collect()
}
