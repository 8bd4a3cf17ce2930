crate::define_id_enum! {
    /// Framework tag shared with the remote generation service
    FrameworkId {
        Laravel => "laravel" : "Laravel",
        Symfony => "symfony" : "Symfony",
        Django => "django" : "Django",
        Flask => "flask" : "Flask",
        FastApi => "fastapi" : "FastAPI",
        Static => "static" : "Static",
        React => "react" : "React",
        Vue => "vue" : "Vue",
        Angular => "angular" : "Angular",
        Next => "next" : "Next.js" | "nextjs",
        Nuxt => "nuxt" : "Nuxt",
    }
}

crate::define_id_enum! {
    /// Implementation language of a backend
    BackendLanguage {
        Php => "php" : "PHP",
        Python => "python" : "Python",
        Ruby => "ruby" : "Ruby",
        Go => "go" : "Go" | "golang",
        Java => "java" : "Java",
        JavaScript => "javascript" : "JavaScript" | "js",
        TypeScript => "typescript" : "TypeScript" | "ts",
    }
}
