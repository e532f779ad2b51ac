//! Fixed term tables driving tagging and trend detection.
//!
//! All tables are `'static` constants. [`Vocabulary`] bundles references to
//! them so tests can swap in smaller tables without touching global state.

/// A named trend recognised through any one of several phrase variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundPattern {
    /// Display label, used as the topic name.
    pub label: &'static str,
    /// Lower-case phrases; an article matches when its text contains any of them.
    pub variants: &'static [&'static str],
}

/// A canned learning recommendation for a known compound-trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedRecommendation {
    pub label: &'static str,
    pub recommendation: &'static str,
}

/// The set of term tables one analysis run uses.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    /// Canonical tech tags matched by substring against article text.
    pub tech_tags: &'static [&'static str],
    /// Lower-case single words counted by the keyword-frequency pass.
    pub trend_words: &'static [&'static str],
    /// Keywords too generic to become a trend on their own.
    pub generic_terms: &'static [&'static str],
    pub compound_patterns: &'static [CompoundPattern],
    pub curated_recommendations: &'static [CuratedRecommendation],
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            tech_tags: TECH_TAGS,
            trend_words: TREND_WORDS,
            generic_terms: GENERIC_TERMS,
            compound_patterns: COMPOUND_PATTERNS,
            curated_recommendations: CURATED_RECOMMENDATIONS,
        }
    }
}

impl Vocabulary {
    /// Case-insensitive membership test against the generic stoplist.
    pub fn is_generic(&self, keyword: &str) -> bool {
        self.generic_terms
            .iter()
            .any(|term| term.eq_ignore_ascii_case(keyword))
    }

    /// Exact lookup of a curated recommendation by topic label.
    pub fn curated_recommendation(&self, label: &str) -> Option<&'static str> {
        self.curated_recommendations
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.recommendation)
    }
}

pub const TECH_TAGS: &[&str] = &[
    // AI & machine learning
    "AI", "Artificial Intelligence", "Machine Learning", "ML", "LLM", "Large Language Model",
    "GPT", "ChatGPT", "Claude", "Generative AI", "GenAI", "AI Agent", "Agentic AI",
    "AI Agents", "Multi-Agent", "Agent Framework", "LangChain", "AutoGPT", "RAG",
    "Retrieval Augmented Generation", "Fine-tuning", "Prompt Engineering", "Vector Database",
    "Embeddings", "Transformer", "Neural Network", "Deep Learning", "NLP", "Computer Vision",
    // Cloud & infrastructure
    "Azure", "AWS", "GCP", "Cloud", "Azure OpenAI", "Azure AI", "OpenAI", "Anthropic",
    "Docker", "Kubernetes", "Container", "Serverless", "Microservices", "Infrastructure",
    "SRE", "Platform Engineering", "DevOps", "CI/CD", "Monitoring", "Observability",
    // Languages & frameworks
    "C#", ".NET", "ASP.NET", "Python", "JavaScript", "TypeScript", "Rust", "Go", "Java",
    "API", "REST", "GraphQL", "gRPC", "Database", "SQL", "NoSQL", "PostgreSQL", "Redis",
    // Architecture & design
    "System Design", "Software Architecture", "Distributed Systems", "Event-Driven",
    "CQRS", "Event Sourcing", "Domain-Driven Design", "DDD", "Clean Architecture",
    "Performance", "Scalability", "High Availability", "Load Balancing",
    // Security
    "Security", "Cybersecurity", "Authentication", "Authorization", "OAuth", "JWT",
    "Zero Trust", "Identity", "RBAC", "Encryption", "TLS", "PKI",
    // Tooling & practices
    "Framework", "Library", "Open Source", "Git", "GitHub", "Deployment", "Testing",
    "Unit Testing", "Integration Testing", "TDD", "BDD", "Code Review", "Refactoring",
];

/// Only entries of three or more characters without separators can ever match,
/// since text is split on whitespace and punctuation before lookup.
pub const TREND_WORDS: &[&str] = &[
    "ai", "artificial intelligence", "machine learning", "ml", "deep learning",
    "azure", "aws", "gcp", "cloud", "serverless", "kubernetes", "docker",
    "react", "angular", "vue", "javascript", "typescript", "node.js",
    "python", "java", "c#", "go", "rust", "kotlin", "swift",
    "devops", "ci/cd", "automation", "microservices", "api", "rest", "graphql",
    "database", "sql", "nosql", "mongodb", "postgresql", "redis",
    "security", "cybersecurity", "blockchain", "crypto", "web3",
    "mobile", "ios", "android", "flutter", "react native",
    "frontend", "backend", "fullstack", "framework", "library",
];

pub const GENERIC_TERMS: &[&str] = &[
    "ai", "go", "api", "git", "github", "rest", "testing", "programming",
    "development", "software", "technology", "code", "system", "data",
];

pub const COMPOUND_PATTERNS: &[CompoundPattern] = &[
    CompoundPattern {
        label: "AI Agents",
        variants: &["ai agent", "agentic ai", "ai agents", "autonomous agent", "agent framework"],
    },
    CompoundPattern {
        label: "Vector Database",
        variants: &["vector database", "vector db", "pinecone", "weaviate", "chroma", "qdrant"],
    },
    CompoundPattern {
        label: "RAG Systems",
        variants: &["rag", "retrieval augmented", "retrieval-augmented generation", "rag pipeline"],
    },
    CompoundPattern {
        label: "LLM Engineering",
        variants: &["llm engineering", "prompt engineering", "fine-tuning", "model optimization", "llm ops"],
    },
    CompoundPattern {
        label: "Cloud Native",
        variants: &["cloud native", "cloud-native", "serverless architecture", "container orchestration"],
    },
    CompoundPattern {
        label: "Platform Engineering",
        variants: &["platform engineering", "developer experience", "internal platforms", "devex"],
    },
    CompoundPattern {
        label: "Real-time AI",
        variants: &["real-time ai", "streaming ai", "edge ai", "ai inference", "live ai"],
    },
    CompoundPattern {
        label: "AI Governance",
        variants: &["ai governance", "ai ethics", "responsible ai", "ai compliance", "ai safety"],
    },
    CompoundPattern {
        label: "Multimodal AI",
        variants: &["multimodal", "vision language", "vlm", "multimodal ai", "cross-modal"],
    },
    CompoundPattern {
        label: "Edge Computing",
        variants: &["edge computing", "edge ai", "iot edge", "distributed computing", "fog computing"],
    },
];

pub const CURATED_RECOMMENDATIONS: &[CuratedRecommendation] = &[
    CuratedRecommendation {
        label: "AI Agents",
        recommendation: "Build a multi-agent system using LangChain or AutoGen - start with a simple research assistant that coordinates multiple specialized agents",
    },
    CuratedRecommendation {
        label: "Vector Database",
        recommendation: "Implement RAG with Pinecone or Weaviate - build a document Q&A system for your own knowledge base",
    },
    CuratedRecommendation {
        label: "RAG Systems",
        recommendation: "Create a production RAG pipeline combining embeddings, vector search, and LLM completion for enterprise document search",
    },
    CuratedRecommendation {
        label: "LLM Engineering",
        recommendation: "Master prompt engineering and fine-tuning - experiment with few-shot learning and chain-of-thought prompting",
    },
    CuratedRecommendation {
        label: "Platform Engineering",
        recommendation: "Design an internal developer platform using Backstage or Humanitec to improve team productivity",
    },
    CuratedRecommendation {
        label: "Cloud Native",
        recommendation: "Implement serverless-first architecture with event-driven microservices on Azure Functions or AWS Lambda",
    },
    CuratedRecommendation {
        label: "Real-time AI",
        recommendation: "Build real-time AI inference with streaming data using Azure Stream Analytics and edge deployment",
    },
    CuratedRecommendation {
        label: "AI Governance",
        recommendation: "Establish AI model governance with MLOps pipelines, monitoring, and responsible AI practices",
    },
    CuratedRecommendation {
        label: "Multimodal AI",
        recommendation: "Experiment with vision-language models for document understanding or image-text retrieval systems",
    },
    CuratedRecommendation {
        label: "Edge Computing",
        recommendation: "Deploy AI models to edge devices using Azure IoT Edge or AWS Greengrass for low-latency inference",
    },
];
