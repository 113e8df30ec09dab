//! Read-only catalogue of starter form values.

use serde::Serialize;

use crate::generation::form::ResumeFormData;

#[derive(Debug, Clone, Serialize)]
pub struct ResumeTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub data: ResumeFormData,
}

pub fn starter_templates() -> Vec<ResumeTemplate> {
    vec![software_engineer(), marketing_specialist()]
}

fn software_engineer() -> ResumeTemplate {
    ResumeTemplate {
        id: "software-engineer",
        title: "Software Engineer",
        description: "Template for software development professionals",
        data: ResumeFormData {
            name: "Alex Johnson".into(),
            email: "alex.johnson@example.com".into(),
            phone: "(555) 123-4567".into(),
            job_title: "Senior Software Engineer".into(),
            location: "San Francisco, CA".into(),
            website: "linkedin.com/in/alexjohnson".into(),
            summary: "Experienced software engineer with 7+ years of experience in full-stack \
                      development. Specialized in React, Node.js, and cloud architecture. \
                      Passionate about creating scalable and maintainable code."
                .into(),
            experience: "Company: TechCorp Inc.\n\
                         Position: Senior Software Engineer\n\
                         Duration: January 2020 - Present\n\
                         Responsibilities:\n\
                         - Led a team of 5 developers to build and maintain a SaaS platform\n\
                         - Implemented CI/CD pipelines reducing deployment time by 40%\n\
                         - Refactored legacy codebase improving performance by 30%\n\
                         \n\
                         Company: WebSolutions LLC\n\
                         Position: Software Developer\n\
                         Duration: June 2017 - December 2019\n\
                         Responsibilities:\n\
                         - Developed responsive web applications using React and Redux\n\
                         - Collaborated with UX designers to implement user-friendly interfaces\n\
                         - Participated in code reviews and mentored junior developers"
                .into(),
            education: "Degree: Master of Science in Computer Science\n\
                        Institution: University of California, Berkeley\n\
                        Graduation Year: 2017\n\
                        \n\
                        Degree: Bachelor of Science in Software Engineering\n\
                        Institution: Stanford University\n\
                        Graduation Year: 2015"
                .into(),
            skills: "Technical Skills: JavaScript, TypeScript, React, Node.js, Express, MongoDB, \
                     AWS, Docker, Kubernetes, Git\n\
                     Soft Skills: Team Leadership, Problem Solving, Communication, Agile Methodologies"
                .into(),
            projects: "Project: E-commerce Platform\n\
                       Technologies: React, Node.js, MongoDB, AWS\n\
                       Description: Built a scalable e-commerce platform with user authentication, \
                       product catalog, and payment processing.\n\
                       \n\
                       Project: Real-time Chat Application\n\
                       Technologies: Socket.io, React, Express, Redis\n\
                       Description: Developed a real-time messaging application supporting \
                       multiple chat rooms and direct messaging."
                .into(),
            certifications: "AWS Certified Solutions Architect (2022)\n\
                             Google Cloud Professional Developer (2021)\n\
                             MongoDB Certified Developer (2020)"
                .into(),
            resume_style: "professional".into(),
            tone_style: "confident".into(),
            language: "english".into(),
            additional_instructions: "Focus on technical achievements and problem-solving skills."
                .into(),
        },
    }
}

fn marketing_specialist() -> ResumeTemplate {
    ResumeTemplate {
        id: "marketing-specialist",
        title: "Marketing Specialist",
        description: "Template for marketing and PR professionals",
        data: ResumeFormData {
            name: "Jamie Smith".into(),
            email: "jamie.smith@example.com".into(),
            phone: "(555) 987-6543".into(),
            job_title: "Digital Marketing Manager".into(),
            location: "New York, NY".into(),
            website: "linkedin.com/in/jamiesmith".into(),
            summary: "Results-driven marketing professional with 5+ years of experience in digital \
                      marketing strategies. Proven track record of increasing brand awareness and \
                      driving conversion rates through innovative campaigns."
                .into(),
            experience: "Company: Brand Innovators\n\
                         Position: Digital Marketing Manager\n\
                         Duration: March 2021 - Present\n\
                         Responsibilities:\n\
                         - Managed social media campaigns resulting in 45% increase in engagement\n\
                         - Developed and executed email marketing strategies with 25% higher open rates\n\
                         - Supervised a team of 3 content creators and 2 graphic designers\n\
                         \n\
                         Company: MarketPro Agency\n\
                         Position: Marketing Specialist\n\
                         Duration: August 2018 - February 2021\n\
                         Responsibilities:\n\
                         - Created and optimized Google and Facebook ad campaigns\n\
                         - Conducted market research and competitor analysis\n\
                         - Collaborated with clients to develop marketing strategies aligned with business goals"
                .into(),
            education: "Degree: Bachelor of Business Administration, Marketing\n\
                        Institution: New York University\n\
                        Graduation Year: 2018\n\
                        \n\
                        Certification: Digital Marketing Professional\n\
                        Institution: American Marketing Association\n\
                        Year: 2019"
                .into(),
            skills: "Technical Skills: Google Analytics, SEO/SEM, Content Marketing, Social Media \
                     Management, Email Marketing, Adobe Creative Suite, HubSpot, Mailchimp\n\
                     Soft Skills: Creative Thinking, Project Management, Client Relations, Data \
                     Analysis, Strategic Planning"
                .into(),
            projects: "Campaign: Product Launch Campaign\n\
                       Platforms: Instagram, Facebook, Google Ads\n\
                       Results: Achieved 150% of sales targets within first month of launch\n\
                       \n\
                       Campaign: Brand Awareness Initiative\n\
                       Platforms: YouTube, LinkedIn, Industry Publications\n\
                       Results: Increased website traffic by 75% and generated 500+ qualified leads"
                .into(),
            certifications: "Google Analytics Certification (2022)\n\
                             HubSpot Inbound Marketing Certification (2021)\n\
                             Facebook Blueprint Certification (2020)"
                .into(),
            resume_style: "creative".into(),
            tone_style: "enthusiastic".into(),
            language: "english".into(),
            additional_instructions:
                "Highlight creative achievements and measurable marketing results.".into(),
        },
    }
}
